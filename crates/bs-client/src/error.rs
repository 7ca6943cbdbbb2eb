//! Configuration error types.

use thiserror::Error;

/// Problems with the environment, detected before any network call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{} not set", .0.join(", "))]
    Missing(Vec<String>),

    #[error("invalid {name}: {reason}")]
    Invalid { name: String, reason: String },
}

/// Convenience alias.
pub type ConfigResult<T> = Result<T, ConfigError>;
