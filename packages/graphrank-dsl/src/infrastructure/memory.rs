//! In-process `GraphConnection`
//!
//! Records every statement, keeps a set of projection names for the
//! `gds.graph.exists/create/drop` catalog calls, and replays queued row sets
//! for everything else. Useful for dry runs and for exercising the builder
//! without a database.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeSet, VecDeque};

use crate::domain::{GraphConnection, Row};
use crate::error::{QueryError, Result};

const EXISTS_CALL: &str = "CALL gds.graph.exists(";
const CREATE_CALL: &str = "CALL gds.graph.create(";
const DROP_CALL: &str = "CALL gds.graph.drop(";

#[derive(Debug, Default)]
struct MemoryState {
    statements: Vec<String>,
    graphs: BTreeSet<String>,
    responses: VecDeque<Vec<Row>>,
    failure: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryConnection {
    state: Mutex<MemoryState>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with projection `name` already present
    pub fn with_graph(self, name: impl Into<String>) -> Self {
        self.state.lock().graphs.insert(name.into());
        self
    }

    /// Queue the rows returned by the next non-catalog statement
    pub fn push_response(&self, rows: Vec<Row>) {
        self.state.lock().responses.push_back(rows);
    }

    /// Make the next statement fail with a database error
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().failure = Some(message.into());
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().statements.clone()
    }

    pub fn graphs(&self) -> Vec<String> {
        self.state.lock().graphs.iter().cloned().collect()
    }

    pub fn has_graph(&self, name: &str) -> bool {
        self.state.lock().graphs.contains(name)
    }
}

/// First single-quoted argument after `prefix`, with `\'` and `\\` unescaped
fn graph_name_argument(cypher: &str, prefix: &str) -> Option<String> {
    let rest = cypher.strip_prefix(prefix)?.strip_prefix('\'')?;
    let mut name = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => name.push(chars.next()?),
            '\'' => return Some(name),
            other => name.push(other),
        }
    }
    None
}

fn row<const N: usize>(entries: [(&str, Value); N]) -> Row {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl GraphConnection for MemoryConnection {
    fn execute(&self, cypher: &str) -> Result<Vec<Row>> {
        let mut state = self.state.lock();
        state.statements.push(cypher.to_string());

        if let Some(message) = state.failure.take() {
            return Err(QueryError::database(message));
        }

        if let Some(name) = graph_name_argument(cypher, EXISTS_CALL) {
            let exists = state.graphs.contains(&name);
            return Ok(vec![row([("exists", Value::Bool(exists))])]);
        }

        if let Some(name) = graph_name_argument(cypher, CREATE_CALL) {
            if !state.graphs.insert(name.clone()) {
                return Err(QueryError::database(format!(
                    "A graph with name '{}' already exists.",
                    name
                )));
            }
            return Ok(vec![row([
                ("graphName", Value::from(name)),
                ("nodeCount", Value::from(0)),
                ("relationshipCount", Value::from(0)),
            ])]);
        }

        if let Some(name) = graph_name_argument(cypher, DROP_CALL) {
            if !state.graphs.remove(&name) {
                return Err(QueryError::database(format!(
                    "Graph with name `{}` does not exist",
                    name
                )));
            }
            return Ok(vec![row([("graphName", Value::from(name))])]);
        }

        Ok(state.responses.pop_front().unwrap_or_default())
    }
}
