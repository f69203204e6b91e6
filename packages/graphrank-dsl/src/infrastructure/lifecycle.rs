//! Projection lifecycle: exists / create / delete against the database

use tracing::debug;

use crate::domain::{GraphConnection, Projection};
use crate::error::{QueryError, Result};

use super::cypher;
use super::execute;

/// Binds a projection to the connection its catalog statements run on
///
/// These are the only effectful catalog operations in the crate. Failures are
/// database errors and are never retried here.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionLifecycle<'a> {
    connection: &'a dyn GraphConnection,
    projection: &'a Projection,
    log: bool,
}

impl<'a> ProjectionLifecycle<'a> {
    pub fn new(connection: &'a dyn GraphConnection, projection: &'a Projection) -> Self {
        Self {
            connection,
            projection,
            log: true,
        }
    }

    /// Toggle statement logging (on by default)
    pub fn with_logging(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn projection(&self) -> &Projection {
        self.projection
    }

    pub fn exists(&self) -> Result<bool> {
        let statement = cypher::graph_exists(self.projection.name());
        let rows = execute(self.connection, &statement, self.log)?;

        rows.first()
            .and_then(|row| row.get("exists"))
            .and_then(|value| value.as_bool())
            .ok_or_else(|| {
                QueryError::database(format!(
                    "unexpected response to existence check of projection '{}'",
                    self.projection.name()
                ))
            })
    }

    pub fn create(&self) -> Result<()> {
        let statement = cypher::graph_create(self.projection);
        execute(self.connection, &statement, self.log)?;
        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        let statement = cypher::graph_drop(self.projection.name());
        execute(self.connection, &statement, self.log)?;
        Ok(())
    }

    /// Create the projection unless it already exists.
    ///
    /// Returns `true` when a create statement was issued.
    pub fn ensure(&self) -> Result<bool> {
        if self.exists()? {
            debug!(projection = self.projection.name(), "projection already present");
            return Ok(false);
        }
        self.create()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectionIdentity;
    use crate::error::ErrorKind;
    use crate::infrastructure::MemoryConnection;

    fn web() -> Projection {
        Projection::named("web", ProjectionIdentity::default())
    }

    #[test]
    fn test_ensure_creates_once() {
        let connection = MemoryConnection::new();
        let projection = web();
        let lifecycle = ProjectionLifecycle::new(&connection, &projection).with_logging(false);

        assert!(!lifecycle.exists().unwrap());
        assert!(lifecycle.ensure().unwrap());
        assert!(lifecycle.exists().unwrap());
        assert!(!lifecycle.ensure().unwrap());

        let creates = connection
            .statements()
            .iter()
            .filter(|s| s.starts_with("CALL gds.graph.create("))
            .count();
        assert_eq!(creates, 1);
    }

    #[test]
    fn test_delete_removes_projection() {
        let connection = MemoryConnection::new().with_graph("web");
        let projection = web();
        let lifecycle = ProjectionLifecycle::new(&connection, &projection);

        assert!(lifecycle.exists().unwrap());
        lifecycle.delete().unwrap();
        assert!(!lifecycle.exists().unwrap());
    }

    #[test]
    fn test_failure_is_database_error() {
        let connection = MemoryConnection::new();
        connection.fail_next("connection reset");
        let projection = web();

        let err = ProjectionLifecycle::new(&connection, &projection)
            .ensure()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(!connection.has_graph("web"));
    }
}
