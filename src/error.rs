//! Error types for classification requests
//!
//! None of these reach the user verbatim: the UI always shows
//! [`GENERIC_ERROR_MESSAGE`](crate::constants::GENERIC_ERROR_MESSAGE).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed prediction payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ClassifyError {
    /// Short tag used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifyError::Network(e) if e.is_timeout() => "timeout",
            ClassifyError::Network(_) => "network",
            ClassifyError::Status { .. } => "status",
            ClassifyError::Decode(_) => "decode",
            ClassifyError::Endpoint(_) => "endpoint",
            ClassifyError::Cancelled => "cancelled",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
