//! Error types for evodrive_io crate.

use evodrive_core::EvolutionError;
use thiserror::Error;

/// Main error type for evodrive_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for evodrive_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Self::Parse(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<IoError> for EvolutionError {
    fn from(err: IoError) -> Self {
        EvolutionError::persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::parse("bad float");
        assert_eq!(err.to_string(), "Parse error: bad float");
    }

    #[test]
    fn test_error_context() {
        let err = IoError::parse("value 3").with_context("loading weights");
        assert!(err.to_string().contains("loading weights"));
        assert!(err.to_string().contains("value 3"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: IoError = io_err.into();
        assert!(matches!(err, IoError::FileSystem(_)));
    }

    #[test]
    fn test_converts_to_persistence_error() {
        let err: EvolutionError = IoError::parse("empty").into();
        assert!(matches!(err, EvolutionError::Persistence(_)));
    }
}
