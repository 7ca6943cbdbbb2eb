//! Log retrieval error types.

use thiserror::Error;

/// Errors that can occur while fetching or decoding log rows.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("remote returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("query not supported by this source: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for log retrieval results.
pub type LogResult<T> = Result<T, LogError>;
