//! Better Stack log CLIs: library crate behind the `bs-logs` and
//! `bs-vercel-logs` binaries.
//!
//! Exposes the argument structs and pipelines so external crates (e.g.
//! `bs-e2e-tests`) can drive a full run against a mock server.

pub mod error;
pub mod man;
pub mod search_cmd;
pub mod telemetry;
pub mod vercel_cmd;

pub use error::{CliError, CliResult};
