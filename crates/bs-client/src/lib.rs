//! HTTP clients for the two Better Stack read APIs.
//!
//! `SearchClient` issues a bearer-authenticated GET against the log search
//! endpoint; `SqlClient` POSTs a SQL statement with basic auth to the query
//! endpoint and decodes newline-delimited JSON. Both implement
//! `bs_log_tools::LogSource`. Credentials come from the environment via
//! `config`.

pub mod config;
pub mod error;
pub mod search;
pub mod sql;

pub use config::{Environment, QueryConfig, SearchConfig};
pub use error::{ConfigError, ConfigResult};
pub use search::SearchClient;
pub use sql::SqlClient;
