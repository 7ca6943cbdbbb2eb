//! Client-side row filtering.
//!
//! The remote schema for the embedded `raw` payload is not indexable
//! server-side, so only the time window is pushed into the query and every
//! other predicate runs here after the fetch. All active predicates are
//! AND-ed; a row missing the field an active predicate needs is rejected.

use crate::row::LogRow;
use crate::types::{LogLevel, StatusClass};

/// Server-side limit multiplier applied while any client-side filter is active.
pub const OVERFETCH_MULTIPLIER: u32 = 5;

/// Whether a row's level text satisfies an optional minimum.
///
/// No minimum always passes. With a minimum, unranked or missing levels fail.
pub fn level_meets_min(level: Option<&str>, min: Option<LogLevel>) -> bool {
    let Some(min) = min else {
        return true;
    };
    level
        .and_then(LogLevel::parse)
        .is_some_and(|rank| rank >= min)
}

/// Optional predicates over fetched rows. Everything defaults to "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_level: Option<LogLevel>,
    /// Accepted sources (empty = all).
    pub sources: Vec<String>,
    /// Accepted status classes (empty = all).
    pub status_classes: Vec<StatusClass>,
    pub min_status: Option<i64>,
    pub method: Option<String>,
    /// Exact request path.
    pub path: Option<String>,
    pub path_contains: Option<String>,
    /// Substring of the message text.
    pub contains: Option<String>,
    pub deployment_id: Option<String>,
    pub environment: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    pub fn with_status_classes(mut self, classes: Vec<StatusClass>) -> Self {
        self.status_classes = classes;
        self
    }

    pub fn with_min_status(mut self, status: i64) -> Self {
        self.min_status = Some(status);
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    /// True when at least one predicate is set.
    pub fn is_active(&self) -> bool {
        self.min_level.is_some()
            || !self.sources.is_empty()
            || !self.status_classes.is_empty()
            || self.min_status.is_some()
            || self.method.is_some()
            || self.path.is_some()
            || self.path_contains.is_some()
            || self.contains.is_some()
            || self.deployment_id.is_some()
            || self.environment.is_some()
    }

    /// Check a single row against every active predicate.
    pub fn matches(&self, row: &LogRow) -> bool {
        if !level_meets_min(row.level_text().as_deref(), self.min_level) {
            return false;
        }

        if !self.sources.is_empty() {
            let Some(source) = row.source() else {
                return false;
            };
            if !self.sources.iter().any(|s| s.eq_ignore_ascii_case(&source)) {
                return false;
            }
        }

        let http = row.http_bits();

        if !self.status_classes.is_empty() {
            let Some(status) = http.status else {
                return false;
            };
            if !self.status_classes.iter().any(|c| c.contains(status)) {
                return false;
            }
        }

        if let Some(min) = self.min_status
            && !http.status.is_some_and(|s| s >= min)
        {
            return false;
        }

        if let Some(method) = &self.method
            && !http.method.as_deref().is_some_and(|m| m.eq_ignore_ascii_case(method.trim()))
        {
            return false;
        }

        if let Some(path) = &self.path
            && http.path.as_deref() != Some(path.as_str())
        {
            return false;
        }

        if let Some(needle) = &self.path_contains
            && !http.path.as_deref().is_some_and(|p| contains_ignore_case(p, needle))
        {
            return false;
        }

        if let Some(needle) = &self.contains
            && !row.message().is_some_and(|m| contains_ignore_case(&m, needle))
        {
            return false;
        }

        if let Some(id) = &self.deployment_id
            && row.deployment_id().as_deref() != Some(id.as_str())
        {
            return false;
        }

        if let Some(env) = &self.environment
            && !row.environment().is_some_and(|e| e.eq_ignore_ascii_case(env))
        {
            return false;
        }

        true
    }

    /// Keep the rows that satisfy every active predicate, in order.
    pub fn apply(&self, rows: Vec<LogRow>) -> Vec<LogRow> {
        if !self.is_active() {
            return rows;
        }
        let before = rows.len();
        let kept: Vec<LogRow> = rows.into_iter().filter(|row| self.matches(row)).collect();
        tracing::debug!(before, after = kept.len(), "client-side filter applied");
        kept
    }

    /// Row count to request from the server for a desired final `limit`.
    ///
    /// Over-requests while filters are active. This narrows, but does not
    /// close, the gap for highly selective filters.
    pub fn fetch_limit(&self, limit: Option<u32>) -> Option<u32> {
        limit.map(|n| {
            if self.is_active() {
                n.saturating_mul(OVERFETCH_MULTIPLIER)
            } else {
                n
            }
        })
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
