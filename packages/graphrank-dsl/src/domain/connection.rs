//! Connection port and query outcomes
//!
//! The driver behind a `GraphConnection` is supplied by the caller; this crate
//! only hands it finished Cypher text and reads the rows it returns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// One result row, column name → value
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Database connection abstraction
///
/// Implementations must be safe to share between builders; the builder never
/// mutates a connection, it only issues statements through it.
pub trait GraphConnection: fmt::Debug + Send + Sync {
    /// Execute one Cypher statement and return its rows
    ///
    /// # Errors
    ///
    /// Any driver or server failure, reported as a database error
    fn execute(&self, cypher: &str) -> Result<Vec<Row>>;
}

/// Summary row returned by write-mode procedures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteSummary {
    pub node_properties_written: u64,
    pub ran_iterations: u64,
    pub did_converge: bool,
}

/// Native result of running a prepared query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Stream mode: one row per ranked node
    Rows(Vec<Row>),
    /// Write mode: scores were persisted
    Written(WriteSummary),
}

impl QueryOutcome {
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Written(_) => None,
        }
    }

    pub fn summary(&self) -> Option<&WriteSummary> {
        match self {
            QueryOutcome::Rows(_) => None,
            QueryOutcome::Written(summary) => Some(summary),
        }
    }

    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Written(_) => None,
        }
    }
}
