//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration and manifests.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error on a specific path.
    #[error("io error on {path}: {source}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding error on a specific path.
    #[error("invalid json in {path}: {source}")]
    Json {
        /// Path being decoded.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while executing a statement batch.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Could not open a connection.
    #[error("connection error: {0}")]
    Connect(#[source] sqlx::Error),

    /// Could not start the transaction.
    #[error("begin failed: {0}")]
    Begin(#[source] sqlx::Error),

    /// A statement of the batch failed; the transaction was rolled back.
    #[error("statement {index} failed: {source}")]
    Statement {
        /// Zero-based position of the statement in the batch.
        index: usize,
        /// Underlying error.
        #[source]
        source: sqlx::Error,
    },

    /// Commit failed.
    #[error("commit failed: {0}")]
    Commit(#[source] sqlx::Error),

    /// Executor-specific failure not originating from the driver.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::io(
            "/app/op/families.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("/app/op/families.json"));

        let err = ExecError::Other("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }
}
