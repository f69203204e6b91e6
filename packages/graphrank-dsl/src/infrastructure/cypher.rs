// Cypher fragment rendering
//
// Literals, identifiers, MATCH clauses, configuration maps and the
// gds.graph.* catalog statements. All output is deterministic: property maps
// are BTreeMaps and selections are sorted sets.

use serde_json::Value;

use crate::domain::{ExecutionMode, FilterPredicate, Projection, RankConfiguration, Selection};

/// Single-quoted string literal
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Identifier, backtick-escaped unless it is a plain name
pub fn identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Float literal that always carries a decimal point
pub fn float_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Property value literal; strings are double-quoted
pub fn value_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(value_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => map_literal(map.iter().map(|(k, v)| (k.as_str(), value_literal(v)))),
    }
}

/// `{key: value, ...}` from already-rendered values
pub fn map_literal<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| format!("{}: {}", identifier(key), value))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// `MATCH (variable: Label {k: v})` line for one filter predicate
pub fn match_clause(predicate: &FilterPredicate) -> String {
    let mut clause = format!(
        "MATCH ({}: {}",
        identifier(&predicate.variable),
        identifier(&predicate.label)
    );
    if !predicate.properties.is_empty() {
        clause.push(' ');
        clause.push_str(&map_literal(
            predicate
                .properties
                .iter()
                .map(|(k, v)| (k.as_str(), value_literal(v))),
        ));
    }
    clause.push_str(")\n");
    clause
}

/// Algorithm configuration map for the given mode
///
/// The write property only appears in write mode; filtered configurations
/// pass their matched variables as `sourceNodes`.
pub fn configuration_map(configuration: &RankConfiguration, mode: ExecutionMode) -> String {
    let parameters = configuration.parameters();
    let mut entries: Vec<(&str, String)> = vec![
        ("maxIterations", parameters.max_iterations.to_string()),
        ("dampingFactor", float_literal(parameters.damping_factor)),
    ];

    if mode == ExecutionMode::Write {
        if let Some(property) = &parameters.write_property {
            entries.push(("writeProperty", quote(property)));
        }
    }

    if configuration.is_filtered() {
        let sources: Vec<String> = configuration
            .filters()
            .iter()
            .map(|f| identifier(&f.variable))
            .collect();
        entries.push(("sourceNodes", format!("[{}]", sources.join(", "))));
    }

    map_literal(entries)
}

fn selection_literal(selection: &Selection) -> String {
    match selection {
        Selection::All => quote(crate::domain::WILDCARD),
        Selection::Only(names) => format!(
            "[{}]",
            names.iter().map(|n| quote(n)).collect::<Vec<_>>().join(", ")
        ),
    }
}

pub fn graph_exists(name: &str) -> String {
    format!("CALL gds.graph.exists({}) YIELD exists RETURN exists", quote(name))
}

pub fn graph_create(projection: &Projection) -> String {
    let identity = projection.identity();
    format!(
        "CALL gds.graph.create({}, {}, {})\n\
         YIELD graphName, nodeCount, relationshipCount\n\
         RETURN graphName, nodeCount, relationshipCount",
        quote(projection.name()),
        selection_literal(&identity.labels),
        selection_literal(&identity.relationships),
    )
}

pub fn graph_drop(name: &str) -> String {
    format!(
        "CALL gds.graph.drop({}) YIELD graphName RETURN graphName",
        quote(name)
    )
}

/// Strip `property` from every node that has it, counting the nodes touched
pub fn remove_property(property: &str) -> String {
    let key = identifier(property);
    format!(
        "MATCH (n) WHERE n.{key} IS NOT NULL\n\
         REMOVE n.{key}\n\
         RETURN count(n) AS removed",
        key = key
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectionIdentity, RankParameters};
    use serde_json::json;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("score"), "'score'");
        assert_eq!(quote("it's"), "'it\\'s'");
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier("name"), "name");
        assert_eq!(identifier("_id2"), "_id2");
        assert_eq!(identifier("first name"), "`first name`");
        assert_eq!(identifier("2nd"), "`2nd`");
        assert_eq!(identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(float_literal(0.8), "0.8");
        assert_eq!(float_literal(0.85), "0.85");
        assert_eq!(float_literal(1.0), "1.0");
        assert_eq!(float_literal(0.0), "0.0");
    }

    #[test]
    fn test_value_literal() {
        assert_eq!(value_literal(&json!("Home")), "\"Home\"");
        assert_eq!(value_literal(&json!(3)), "3");
        assert_eq!(value_literal(&json!(true)), "true");
        assert_eq!(value_literal(&json!([1, "a"])), "[1, \"a\"]");
        assert_eq!(value_literal(&json!({"k": 1})), "{k: 1}");
        assert_eq!(value_literal(&Value::Null), "null");
    }

    #[test]
    fn test_match_clause() {
        let predicate = FilterPredicate::new("home", "Page")
            .with_property("name", "Home")
            .with_property("depth", 0);
        assert_eq!(
            match_clause(&predicate),
            "MATCH (home: Page {depth: 0, name: \"Home\"})\n"
        );

        let bare = FilterPredicate::new("n", "Page");
        assert_eq!(match_clause(&bare), "MATCH (n: Page)\n");
    }

    #[test]
    fn test_configuration_map_modes() {
        let config = RankConfiguration::writing("score");
        assert_eq!(
            configuration_map(&config, ExecutionMode::Write),
            "{maxIterations: 20, dampingFactor: 0.8, writeProperty: 'score'}"
        );
        assert_eq!(
            configuration_map(&config, ExecutionMode::Stream),
            "{maxIterations: 20, dampingFactor: 0.8}"
        );
    }

    #[test]
    fn test_configuration_map_filtered() {
        let config = RankConfiguration::from_parts(
            RankParameters {
                max_iterations: 5,
                damping_factor: 0.85,
                write_property: None,
            },
            vec![FilterPredicate::new("a", "Page"), FilterPredicate::new("b", "Page")],
        );
        assert_eq!(
            configuration_map(&config, ExecutionMode::Stream),
            "{maxIterations: 5, dampingFactor: 0.85, sourceNodes: [a, b]}"
        );
    }

    #[test]
    fn test_catalog_statements() {
        let projection = Projection::named(
            "web",
            ProjectionIdentity::new(Selection::of(["Page"]), Selection::all()),
        );
        assert_eq!(
            graph_exists("web"),
            "CALL gds.graph.exists('web') YIELD exists RETURN exists"
        );
        assert_eq!(
            graph_create(&projection),
            "CALL gds.graph.create('web', ['Page'], '*')\n\
             YIELD graphName, nodeCount, relationshipCount\n\
             RETURN graphName, nodeCount, relationshipCount"
        );
        assert_eq!(
            graph_drop("web"),
            "CALL gds.graph.drop('web') YIELD graphName RETURN graphName"
        );
    }
}
