// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Keyword source error for {path}: {message}")]
    KeywordSource { path: PathBuf, message: String },

    #[error("Matcher error: {0}")]
    Matcher(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote service error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Operation {name} failed: {message}")]
    OperationFailed { name: String, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Transient failures are worth retrying; everything else aborts the run.
    pub fn is_transient(&self) -> bool {
        match self {
            PipelineError::Remote { status, .. } => {
                *status == 429 || (500..=599).contains(status)
            }
            PipelineError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_transient_classification() {
        let rate_limited = PipelineError::Remote {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        let unavailable = PipelineError::Remote {
            status: 503,
            message: "backend unavailable".to_string(),
        };
        let bad_request = PipelineError::Remote {
            status: 400,
            message: "invalid mime type".to_string(),
        };

        assert!(rate_limited.is_transient());
        assert!(unavailable.is_transient());
        assert!(!bad_request.is_transient());
    }

    #[test]
    fn test_precondition_is_terminal() {
        let err = PipelineError::PreconditionFailed("processor already enabled".to_string());
        assert!(!err.is_transient());
    }
}
