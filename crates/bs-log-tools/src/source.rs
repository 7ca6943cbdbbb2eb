//! Log source abstraction: fetch rows from the remote service or a mock.

use async_trait::async_trait;

use crate::error::LogResult;
use crate::query::LogQuery;
use crate::row::LogRow;

/// Rows decoded from a single fetch, plus any response metadata.
#[derive(Debug, Clone, Default)]
pub struct LogBatch {
    /// The `meta` object of a search response (absent for SQL responses).
    pub meta: Option<serde_json::Value>,
    pub rows: Vec<LogRow>,
}

impl LogBatch {
    pub fn new(rows: Vec<LogRow>) -> Self {
        Self { meta: None, rows }
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Abstraction over where log rows come from.
///
/// Each implementation performs exactly one request per `fetch` and never
/// retries; errors are surfaced to the caller as-is.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Short name used in diagnostics (e.g. "search", "sql").
    fn name(&self) -> &str;

    /// Run a built query and decode the response rows.
    async fn fetch(&self, query: &LogQuery) -> LogResult<LogBatch>;
}
