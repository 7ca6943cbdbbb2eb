//! Log retrieval building blocks for Better Stack.
//!
//! Provides tolerant field access over loosely structured log rows (with
//! Vercel HTTP extraction), a level ranking, query and SQL construction,
//! client-side row filtering, table/JSON/compact rendering, and a `LogSource`
//! abstraction for testability.

pub mod error;
pub mod fields;
pub mod filter;
pub mod mock;
pub mod query;
pub mod render;
pub mod row;
pub mod source;
pub mod types;

// Re-export key types for convenience
pub use error::{LogError, LogResult};
pub use filter::{FilterCriteria, level_meets_min};
pub use mock::MockLogSource;
pub use query::{LogQuery, SearchQuery, SortOrder, SqlQuery, TimeWindow};
pub use row::{HttpBits, LogRow};
pub use source::{LogBatch, LogSource};
pub use types::{LogLevel, OutputFormat, StatusClass};
