//! Mock log source for testing. Serves a canned batch and records queries.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

use crate::error::{LogError, LogResult};
use crate::query::LogQuery;
use crate::row::LogRow;
use crate::source::{LogBatch, LogSource};

/// A mock log source that returns pre-loaded rows for any query.
///
/// Every `fetch` is recorded so tests can assert what was (or wasn't) sent.
pub struct MockLogSource {
    rows: Vec<serde_json::Value>,
    meta: Option<serde_json::Value>,
    failure: Option<String>,
    queries: Mutex<Vec<LogQuery>>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            meta: None,
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Serve the given raw rows.
    pub fn with_rows(rows: Vec<serde_json::Value>) -> Self {
        Self {
            rows,
            ..Self::new()
        }
    }

    /// Fail every fetch with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    pub fn set_meta(&mut self, meta: serde_json::Value) {
        self.meta = Some(meta);
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<LogQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Create a mock with sample search-endpoint entries.
    pub fn with_search_sample() -> Self {
        let mut m = Self::with_rows(vec![
            json!({"timestamp": "2024-01-15T12:00:01Z", "level": "info", "message": "Server started"}),
            json!({"timestamp": "2024-01-15T12:00:05Z", "level": "error", "message": "Database timeout\nretrying"}),
            json!({"dt": "2024-01-15T12:00:10Z", "severity": "warn", "msg": "Slow response: 2.3s"}),
            json!({"@timestamp": "2024-01-15T12:00:15Z", "level": "debug", "log": "cache miss"}),
        ]);
        m.set_meta(json!({"from": "2024-01-14T12:00:00Z", "to": "2024-01-15T12:00:00Z"}));
        m
    }

    /// Create a mock with sample Vercel request rows as the SQL endpoint returns them.
    pub fn with_vercel_sample() -> Self {
        Self::with_rows(vec![
            vercel_row("2024-01-15 12:00:01", "info", 200, "GET", "/", "production", "static", "Served index"),
            vercel_row("2024-01-15 12:00:02", "warning", "404", "GET", "/missing", "production", "edge", "Not found"),
            vercel_row("2024-01-15 12:00:03", "error", 500.0, "POST", "/api/checkout", "production", "lambda", "Unhandled rejection"),
            vercel_row("2024-01-15 12:00:04", "error", "503", "POST", "/api/checkout", "preview", "lambda", "Task timed out after 10.00 seconds"),
            vercel_row("2024-01-15 12:00:05", "info", 201, "PUT", "/api/cart", "production", "lambda", "Cart updated"),
            json!({"dt": "2024-01-15 12:00:06", "raw": "{not json"}),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn vercel_row(
    dt: &str,
    level: &str,
    status: impl Into<serde_json::Value>,
    method: &str,
    path: &str,
    environment: &str,
    source: &str,
    message: &str,
) -> serde_json::Value {
    let raw = json!({
        "dt": dt,
        "level": level,
        "message": message,
        "vercel": {
            "deployment_id": "dpl_sample",
            "environment": environment,
            "source": source,
            "proxy": {
                "status_code": status.into(),
                "method": method,
                "path": path
            }
        }
    });
    json!({"dt": dt, "raw": raw.to_string()})
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSource for MockLogSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &LogQuery) -> LogResult<LogBatch> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(message) = &self.failure {
            return Err(LogError::Transport(message.clone()));
        }
        let rows = self.rows.iter().cloned().map(LogRow::from_value).collect();
        let batch = LogBatch::new(rows);
        Ok(match &self.meta {
            Some(meta) => batch.with_meta(meta.clone()),
            None => batch,
        })
    }
}
