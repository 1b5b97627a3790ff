//! Error types for the Sagitta library.
//!
//! All failures are represented by the [`SagittaError`] enum. Index access
//! failures are caught at the request boundary and converted into the
//! structured [`SagittaError::Index`] variant; nothing here is expected to
//! terminate the process.

use std::io;

use thiserror::Error;

/// The main error type for Sagitta operations.
#[derive(Error, Debug)]
pub enum SagittaError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The external full-text index failed or is unavailable.
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, synonym tables, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Vocabulary construction errors.
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SagittaError.
pub type Result<T> = std::result::Result<T, SagittaError>;

impl SagittaError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SagittaError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SagittaError::Analysis(msg.into())
    }

    /// Create a new vocabulary error.
    pub fn vocabulary<S: Into<String>>(msg: S) -> Self {
        SagittaError::Vocabulary(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SagittaError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SagittaError::index("fts backend down");
        assert_eq!(error.to_string(), "Index error: fts backend down");

        let error = SagittaError::analysis("bad synonym table");
        assert_eq!(error.to_string(), "Analysis error: bad synonym table");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = SagittaError::from(io_error);

        match error {
            SagittaError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
