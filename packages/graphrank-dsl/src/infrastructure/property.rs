//! Cleanup of node properties persisted by write-mode runs

use crate::domain::GraphConnection;
use crate::error::{QueryError, Result};

use super::cypher;
use super::execute;

/// Removes `property` from every node carrying it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveProperty {
    property: String,
    cypher: String,
}

impl RemoveProperty {
    /// # Errors
    ///
    /// Configuration error for an empty property name
    pub fn new(property: impl Into<String>) -> Result<Self> {
        let property = property.into();
        if property.is_empty() {
            return Err(QueryError::configuration("property to remove must not be empty"));
        }
        let cypher = cypher::remove_property(&property);
        Ok(Self { property, cypher })
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn cypher(&self) -> &str {
        &self.cypher
    }

    /// Execute and return how many nodes lost the property
    pub fn run(&self, connection: &dyn GraphConnection, log: bool) -> Result<u64> {
        let rows = execute(connection, &self.cypher, log)?;
        match rows.first().and_then(|row| row.get("removed")) {
            None => Ok(0),
            Some(value) => value.as_u64().ok_or_else(|| {
                QueryError::serialization(format!(
                    "unexpected removed count {} for property '{}'",
                    value, self.property
                ))
            }),
        }
    }
}
