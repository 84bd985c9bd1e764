//! Error types for the ftmark library.
//!
//! Stemming, scoring and snippet trimming are total and never fail. Errors
//! arise from configuration loading and from full-text evaluators plugged in
//! behind [`crate::full_text::FullTextExpr`]; the latter are passed through
//! the index access layer untouched.
//!
//! # Examples
//!
//! ```
//! use ftmark::error::{FtMarkError, Result};
//!
//! fn evaluate() -> Result<()> {
//!     Err(FtMarkError::evaluation("index unavailable"))
//! }
//!
//! assert!(evaluate().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ftmark operations.
#[derive(Error, Debug)]
pub enum FtMarkError {
    /// I/O errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure raised by a full-text evaluator
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FtMarkError.
pub type Result<T> = std::result::Result<T, FtMarkError>;

impl FtMarkError {
    /// Create a new evaluation error.
    pub fn evaluation<S: Into<String>>(msg: S) -> Self {
        FtMarkError::Evaluation(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FtMarkError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FtMarkError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = FtMarkError::evaluation("index unavailable");
        assert_eq!(error.to_string(), "Evaluation error: index unavailable");

        let error = FtMarkError::config("unknown language 'xx'");
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown language 'xx'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FtMarkError::from(io_error);

        match error {
            FtMarkError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
