//! Prepared ranking queries
//!
//! Four closed variants (stream/write × PageRank/ArticleRank). The Cypher
//! text is generated once at construction and owned by the variant, so every
//! caller reading `cypher()` from the same instance sees the same string.

use tracing::debug;

use crate::domain::{
    AlgorithmKind, ExecutionMode, GraphConnection, Projection, QueryOutcome, RankConfiguration,
    StreamShape, WriteSummary,
};
use crate::error::{QueryError, Result};

use super::cypher;
use super::execute;

/// Stream-mode query body
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRank {
    projection: Projection,
    configuration: RankConfiguration,
    shape: StreamShape,
    cypher: String,
}

impl StreamRank {
    fn new(
        algorithm: AlgorithmKind,
        projection: Projection,
        configuration: RankConfiguration,
        shape: StreamShape,
    ) -> Self {
        let cypher = render_stream(algorithm, &projection, &configuration, &shape);
        Self {
            projection,
            configuration,
            shape,
            cypher,
        }
    }

    pub fn shape(&self) -> &StreamShape {
        &self.shape
    }
}

/// Write-mode query body
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRank {
    projection: Projection,
    configuration: RankConfiguration,
    cypher: String,
}

impl WriteRank {
    fn new(
        algorithm: AlgorithmKind,
        projection: Projection,
        configuration: RankConfiguration,
    ) -> Result<Self> {
        let property = configuration.write_property().ok_or_else(|| {
            QueryError::resolution("write-mode ranking needs a write property")
        })?;
        if property.is_empty() {
            return Err(QueryError::resolution("write property must not be empty"));
        }
        let cypher = render_write(algorithm, &projection, &configuration);
        Ok(Self {
            projection,
            configuration,
            cypher,
        })
    }
}

/// One fully parameterized ranking query
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedQuery {
    StreamPageRank(StreamRank),
    WritePageRank(WriteRank),
    StreamArticleRank(StreamRank),
    WriteArticleRank(WriteRank),
}

impl PreparedQuery {
    pub fn stream_page_rank(
        projection: Projection,
        configuration: RankConfiguration,
        shape: StreamShape,
    ) -> Self {
        PreparedQuery::StreamPageRank(StreamRank::new(
            AlgorithmKind::PageRank,
            projection,
            configuration,
            shape,
        ))
    }

    pub fn stream_article_rank(
        projection: Projection,
        configuration: RankConfiguration,
        shape: StreamShape,
    ) -> Self {
        PreparedQuery::StreamArticleRank(StreamRank::new(
            AlgorithmKind::ArticleRank,
            projection,
            configuration,
            shape,
        ))
    }

    /// # Errors
    ///
    /// Resolution error if `configuration` carries no write property
    pub fn write_page_rank(
        projection: Projection,
        configuration: RankConfiguration,
    ) -> Result<Self> {
        WriteRank::new(AlgorithmKind::PageRank, projection, configuration)
            .map(PreparedQuery::WritePageRank)
    }

    /// # Errors
    ///
    /// Resolution error if `configuration` carries no write property
    pub fn write_article_rank(
        projection: Projection,
        configuration: RankConfiguration,
    ) -> Result<Self> {
        WriteRank::new(AlgorithmKind::ArticleRank, projection, configuration)
            .map(PreparedQuery::WriteArticleRank)
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        match self {
            PreparedQuery::StreamPageRank(_) | PreparedQuery::WritePageRank(_) => {
                AlgorithmKind::PageRank
            }
            PreparedQuery::StreamArticleRank(_) | PreparedQuery::WriteArticleRank(_) => {
                AlgorithmKind::ArticleRank
            }
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            PreparedQuery::StreamPageRank(_) | PreparedQuery::StreamArticleRank(_) => {
                ExecutionMode::Stream
            }
            PreparedQuery::WritePageRank(_) | PreparedQuery::WriteArticleRank(_) => {
                ExecutionMode::Write
            }
        }
    }

    pub fn cypher(&self) -> &str {
        match self {
            PreparedQuery::StreamPageRank(q) | PreparedQuery::StreamArticleRank(q) => &q.cypher,
            PreparedQuery::WritePageRank(q) | PreparedQuery::WriteArticleRank(q) => &q.cypher,
        }
    }

    pub fn projection(&self) -> &Projection {
        match self {
            PreparedQuery::StreamPageRank(q) | PreparedQuery::StreamArticleRank(q) => &q.projection,
            PreparedQuery::WritePageRank(q) | PreparedQuery::WriteArticleRank(q) => &q.projection,
        }
    }

    pub fn configuration(&self) -> &RankConfiguration {
        match self {
            PreparedQuery::StreamPageRank(q) | PreparedQuery::StreamArticleRank(q) => {
                &q.configuration
            }
            PreparedQuery::WritePageRank(q) | PreparedQuery::WriteArticleRank(q) => {
                &q.configuration
            }
        }
    }

    /// Execute against `connection`. The projection must already exist.
    ///
    /// # Errors
    ///
    /// Database errors from the connection are returned unchanged; a write
    /// run whose summary row cannot be decoded is a serialization error.
    pub fn run(&self, connection: &dyn GraphConnection, log: bool) -> Result<QueryOutcome> {
        debug!(
            algorithm = %self.algorithm(),
            mode = %self.mode(),
            projection = self.projection().name(),
            "running ranking query"
        );
        let rows = execute(connection, self.cypher(), log)?;

        match self.mode() {
            ExecutionMode::Stream => Ok(QueryOutcome::Rows(rows)),
            ExecutionMode::Write => {
                let row = rows.into_iter().next().ok_or_else(|| {
                    QueryError::database("write query returned no summary row")
                })?;
                let summary: WriteSummary = serde_json::from_value(serde_json::Value::Object(row))?;
                Ok(QueryOutcome::Written(summary))
            }
        }
    }
}

fn algorithm_call(
    algorithm: AlgorithmKind,
    mode: ExecutionMode,
    projection: &Projection,
    configuration: &RankConfiguration,
) -> String {
    let mut text: String = configuration.filters().iter().map(cypher::match_clause).collect();
    text.push_str(&format!(
        "CALL {}.{}({}, {})",
        algorithm.procedure(),
        mode.as_str(),
        cypher::quote(projection.name()),
        cypher::configuration_map(configuration, mode),
    ));
    text
}

fn render_stream(
    algorithm: AlgorithmKind,
    projection: &Projection,
    configuration: &RankConfiguration,
    shape: &StreamShape,
) -> String {
    let mut lines = vec![
        algorithm_call(algorithm, ExecutionMode::Stream, projection, configuration),
        "YIELD nodeId, score".to_string(),
    ];

    let columns = match &shape.properties {
        Some(properties) if !properties.is_empty() => properties
            .iter()
            .map(|p| {
                let name = cypher::identifier(p);
                format!("gds.util.asNode(nodeId).{} AS {}", name, name)
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => "gds.util.asNode(nodeId) AS node".to_string(),
    };
    lines.push(format!("RETURN {}, score", columns));

    if let Some(order) = &shape.order_by {
        let direction = if order.descending { " DESC" } else { "" };
        lines.push(format!(
            "ORDER BY {}{}",
            order_key(&order.property, shape.properties.as_deref()),
            direction
        ));
    }
    if let Some(skip) = shape.skip {
        lines.push(format!("SKIP {}", skip));
    }
    if let Some(limit) = shape.limit {
        lines.push(format!("LIMIT {}", limit));
    }

    lines.join("\n")
}

/// Sort expression for `property`
///
/// `score` and selected columns are returned aliases; any other property is
/// read from the node, which stays in scope for `ORDER BY`.
fn order_key(property: &str, selected: Option<&[String]>) -> String {
    let name = cypher::identifier(property);
    match selected {
        _ if property == "score" => name,
        Some(columns) if columns.iter().any(|c| c == property) => name,
        Some(columns) if !columns.is_empty() => format!("gds.util.asNode(nodeId).{}", name),
        _ => format!("node.{}", name),
    }
}

fn render_write(
    algorithm: AlgorithmKind,
    projection: &Projection,
    configuration: &RankConfiguration,
) -> String {
    [
        algorithm_call(algorithm, ExecutionMode::Write, projection, configuration),
        "YIELD nodePropertiesWritten, ranIterations, didConverge".to_string(),
        "RETURN nodePropertiesWritten, ranIterations, didConverge".to_string(),
    ]
    .join("\n")
}
