//! Error types for graphrank-dsl

use std::fmt;
use thiserror::Error;

use crate::config::SettingsError;

/// Query error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid builder call (e.g. projection tag without a collection)
    Configuration,
    /// Mandatory builder input missing when the query is resolved
    Resolution,
    /// Failure reported by the database or its driver
    Database,
    /// Response rows could not be decoded
    Serialization,
    /// Settings file could not be loaded or validated
    Settings,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Resolution => "resolution",
            ErrorKind::Database => "database",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Settings => "settings",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct QueryError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn resolution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Resolution, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// A mandatory builder field was never set
    pub fn missing(field: &str, hint: &str) -> Self {
        Self::resolution(format!("{} is not set; {}", field, hint))
    }

    /// True when the caller misused the builder or its settings, false when
    /// the backend failed.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Configuration | ErrorKind::Resolution | ErrorKind::Settings
        )
    }
}

// JSON error conversions
impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<SettingsError> for QueryError {
    fn from(err: SettingsError) -> Self {
        QueryError::new(ErrorKind::Settings, err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = QueryError::configuration("no collection supplied");
        assert_eq!(format!("{}", err), "[configuration] no collection supplied");
    }

    #[test]
    fn test_missing_field() {
        let err = QueryError::missing("algorithm", "call rank()");
        assert_eq!(err.kind, ErrorKind::Resolution);
        assert!(err.message.contains("algorithm is not set"));
        assert!(err.message.contains("call rank()"));
    }

    #[test]
    fn test_usage_errors_are_distinguishable() {
        assert!(QueryError::configuration("x").is_usage_error());
        assert!(QueryError::resolution("x").is_usage_error());
        assert!(!QueryError::database("x").is_usage_error());
        assert!(!QueryError::serialization("x").is_usage_error());
    }

    #[test]
    fn test_with_source() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = QueryError::database("bolt handshake failed").with_source(io_err);

        assert_eq!(err.kind, ErrorKind::Database);
        let source = err.source().unwrap();
        assert!(source.to_string().contains("refused"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").err().unwrap();
        let err: QueryError = json_err.into();

        assert_eq!(err.kind, ErrorKind::Serialization);
        assert!(err.message.contains("JSON error"));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_settings_error() {
        let err: QueryError = SettingsError::MissingVersion.into();
        assert_eq!(err.kind, ErrorKind::Settings);
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::Configuration.as_str(), "configuration");
        assert_eq!(ErrorKind::Resolution.as_str(), "resolution");
        assert_eq!(ErrorKind::Database.as_str(), "database");
        assert_eq!(ErrorKind::Serialization.as_str(), "serialization");
        assert_eq!(ErrorKind::Settings.as_str(), "settings");
    }
}
