//! Client for the bearer-authenticated log search endpoint.
//!
//! One GET per fetch with `query`, `from`, `to`, `limit` and optional
//! `sources` parameters. The response is a single JSON document whose rows
//! live under `data` (or `entries` for older ingestion paths).

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use bs_log_tools::render::truncate;
use bs_log_tools::{LogBatch, LogError, LogQuery, LogResult, LogRow, LogSource, SearchQuery};

use crate::config::SearchConfig;

/// Longest slice of an error body carried into `LogError::Status`.
pub(crate) const ERROR_BODY_LIMIT: usize = 300;

/// Client for the log search endpoint.
pub struct SearchClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> LogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LogError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Issue the search request and decode the rows.
    pub async fn search(&self, query: &SearchQuery) -> LogResult<LogBatch> {
        tracing::debug!(
            url = %self.config.api_url,
            query = %query.query,
            from = %query.window.start_iso(),
            to = %query.window.end_iso(),
            limit = query.limit,
            sources = ?query.sources,
            "searching logs"
        );

        let response = self
            .client
            .get(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query.params())
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_secs))?;

        if !status.is_success() {
            tracing::warn!(status = %status, "search endpoint returned an error");
            return Err(LogError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), ERROR_BODY_LIMIT),
            });
        }

        let batch = decode_search_body(&body)?;
        tracing::info!(rows = batch.len(), "search complete");
        Ok(batch)
    }
}

/// Map a reqwest failure, naming the timeout when that is what happened.
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> LogError {
    if err.is_timeout() {
        LogError::Transport(format!("timed out after {timeout_secs}s: {err}"))
    } else {
        LogError::Transport(err.to_string())
    }
}

/// Decode a search response document.
///
/// Rows come from a non-empty `data` array, else `entries`, else a bare
/// top-level array; anything else yields no rows. `meta` is kept if present.
pub fn decode_search_body(body: &str) -> LogResult<LogBatch> {
    let doc: Value = serde_json::from_str(body).map_err(|e| LogError::Decode(e.to_string()))?;

    let non_empty_array = |key: &str| {
        doc.get(key)
            .and_then(Value::as_array)
            .filter(|rows| !rows.is_empty())
    };
    let rows = non_empty_array("data")
        .or_else(|| non_empty_array("entries"))
        .or_else(|| doc.as_array())
        .map(|rows| rows.iter().cloned().map(LogRow::from_value).collect())
        .unwrap_or_default();

    let batch = LogBatch::new(rows);
    Ok(match doc.get("meta").filter(|m| m.is_object()) {
        Some(meta) => batch.with_meta(meta.clone()),
        None => batch,
    })
}

#[async_trait]
impl LogSource for SearchClient {
    fn name(&self) -> &str {
        "search"
    }

    async fn fetch(&self, query: &LogQuery) -> LogResult<LogBatch> {
        match query {
            LogQuery::Search(search) => self.search(search).await,
            LogQuery::Sql(_) => Err(LogError::Unsupported(
                "the search endpoint does not accept SQL".into(),
            )),
        }
    }
}
