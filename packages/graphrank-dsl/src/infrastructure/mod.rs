//! Infrastructure layer - Cypher generation, prepared queries, projection
//! lifecycle and connection adapters

pub mod cypher;
pub mod lifecycle;
pub mod memory;
pub mod property;
pub mod rank;

pub use lifecycle::ProjectionLifecycle;
pub use memory::MemoryConnection;
pub use property::RemoveProperty;
pub use rank::{PreparedQuery, StreamRank, WriteRank};

use tracing::info;

use crate::domain::{GraphConnection, Row};
use crate::error::Result;

/// Run one statement, logging its text when `log` is set
pub(crate) fn execute(
    connection: &dyn GraphConnection,
    cypher: &str,
    log: bool,
) -> Result<Vec<Row>> {
    if log {
        info!(cypher, "executing statement");
    }
    connection.execute(cypher)
}
