//! Top-level CLI error and exit-code mapping.

use std::process::ExitCode;

use bs_client::ConfigError;
use bs_log_tools::LogError;

/// Exit code for missing or invalid configuration.
pub const EXIT_CONFIG: u8 = 1;
/// Exit code for fetch, decode, or output failures.
pub const EXIT_FETCH: u8 = 2;

/// Any failure that ends a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("error fetching logs: {0}")]
    Fetch(#[from] LogError),

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Fetch(_) | Self::Output(_) => EXIT_FETCH,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        ExitCode::from(err.exit_code())
    }
}

/// Convenience alias.
pub type CliResult<T> = Result<T, CliError>;
