//! Query construction: time windows, search queries, and SQL statements.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

/// Largest number of rows a single fetch may ask for.
pub const MAX_LIMIT: u32 = 500;
/// Longest lookback window in hours (one week).
pub const MAX_LOOKBACK_HOURS: u32 = 168;
/// Query that matches every entry on the search endpoint.
pub const MATCH_ALL_QUERY: &str = "*";

/// Clamp a requested row count to `[1, MAX_LIMIT]`.
pub fn clamp_limit(n: i64) -> u32 {
    n.clamp(1, i64::from(MAX_LIMIT)) as u32
}

/// Clamp a lookback window to `[1, MAX_LOOKBACK_HOURS]`.
pub fn clamp_hours(hours: i64) -> u32 {
    hours.clamp(1, i64::from(MAX_LOOKBACK_HOURS)) as u32
}

/// Format a timestamp as UTC ISO-8601 at second precision (`...Z`).
pub fn to_iso(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse a user-supplied timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS[.f]`
/// (both read as UTC), and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_time_arg(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|ndt| ndt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| ndt.and_utc())
        })
        .ok_or_else(|| format!("invalid timestamp '{s}' (expected RFC 3339 or YYYY-MM-DD[ HH:MM:SS])"))
}

// ── Time Window ───────────────────────────────────────────────

/// Half-open time range `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    /// The `hours` leading up to `now`.
    pub fn lookback(now: DateTime<Utc>, hours: u32) -> Self {
        Self {
            from: now - Duration::hours(i64::from(hours)),
            to: now,
        }
    }

    /// Resolve optional explicit bounds against a lookback default.
    ///
    /// Both bounds → `[since, before)`; only `since` → `[since, now)`;
    /// only `before` → `[before - hours, before)`; neither → lookback from now.
    pub fn resolve(
        now: DateTime<Utc>,
        since: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
        hours: u32,
    ) -> Self {
        match (since, before) {
            (Some(from), Some(to)) => Self { from, to },
            (Some(from), None) => Self { from, to: now },
            (None, Some(to)) => Self::lookback(to, hours),
            (None, None) => Self::lookback(now, hours),
        }
    }

    pub fn start_iso(&self) -> String {
        to_iso(self.from)
    }

    pub fn end_iso(&self) -> String {
        to_iso(self.to)
    }
}

// ── Sort Order ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "oldest" => Ok(Self::Asc),
            "desc" | "newest" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

// ── Queries ───────────────────────────────────────────────────

/// Parameters for the token-authenticated search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub window: TimeWindow,
    pub limit: u32,
    /// Comma-separated source ids, sent as `sources` when present.
    pub sources: Option<String>,
}

impl SearchQuery {
    /// Use the override verbatim, otherwise match everything.
    pub fn build(
        query_override: Option<&str>,
        window: TimeWindow,
        limit: u32,
        sources: Option<String>,
    ) -> Self {
        let query = query_override
            .filter(|q| !q.trim().is_empty())
            .unwrap_or(MATCH_ALL_QUERY)
            .to_string();
        Self {
            query,
            window,
            limit,
            sources,
        }
    }

    /// Query-string pairs in the order the endpoint documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("from", self.window.start_iso()),
            ("to", self.window.end_iso()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(sources) = &self.sources {
            params.push(("sources", sources.clone()));
        }
        params
    }
}

/// A SQL statement for the basic-auth query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlQuery {
    pub statement: String,
}

impl SqlQuery {
    /// Wrap a caller-supplied statement without modification.
    pub fn verbatim(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
        }
    }

    /// Generate the default statement over `<table_prefix>_logs`.
    ///
    /// Only the time window, order, and limit are pushed to the server; the
    /// remaining criteria are applied client-side since `raw` varies by source.
    pub fn build(
        table_prefix: &str,
        window: &TimeWindow,
        order: SortOrder,
        limit: Option<u32>,
    ) -> Self {
        let mut statement = format!(
            "SELECT dt, raw FROM remote({table_prefix}_logs) \
             WHERE dt >= parseDateTime64BestEffort('{from}') \
             AND dt < parseDateTime64BestEffort('{to}') \
             ORDER BY dt {order}",
            from = window.start_iso(),
            to = window.end_iso(),
            order = order.as_sql(),
        );
        if let Some(limit) = limit {
            statement.push_str(&format!(" LIMIT {limit}"));
        }
        statement.push_str(" FORMAT JSONEachRow");
        Self { statement }
    }
}

/// A fully built query, ready for a `LogSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogQuery {
    Search(SearchQuery),
    Sql(SqlQuery),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(10_000), 500);
        assert_eq!(clamp_hours(0), 1);
        assert_eq!(clamp_hours(24), 24);
        assert_eq!(clamp_hours(1000), 168);
    }

    #[test]
    fn iso_is_second_precision_utc() {
        let t = at(12, 0, 5) + Duration::milliseconds(789);
        assert_eq!(to_iso(t), "2024-01-15T12:00:05Z");
    }

    #[test]
    fn parse_time_formats() {
        assert_eq!(parse_time_arg("2024-01-15T12:00:05Z").unwrap(), at(12, 0, 5));
        assert_eq!(parse_time_arg("2024-01-15T14:00:05+02:00").unwrap(), at(12, 0, 5));
        assert_eq!(parse_time_arg("2024-01-15T12:00:05").unwrap(), at(12, 0, 5));
        assert_eq!(parse_time_arg("2024-01-15 12:00:05").unwrap(), at(12, 0, 5));
        assert_eq!(parse_time_arg("2024-01-15").unwrap(), at(0, 0, 0));
        assert!(parse_time_arg("yesterday").is_err());
    }

    #[test]
    fn window_resolution() {
        let now = at(12, 0, 0);
        let since = at(8, 0, 0);
        let before = at(10, 0, 0);

        let both = TimeWindow::resolve(now, Some(since), Some(before), 3);
        assert_eq!((both.from, both.to), (since, before));

        let only_since = TimeWindow::resolve(now, Some(since), None, 3);
        assert_eq!((only_since.from, only_since.to), (since, now));

        let only_before = TimeWindow::resolve(now, None, Some(before), 3);
        assert_eq!((only_before.from, only_before.to), (at(7, 0, 0), before));

        let neither = TimeWindow::resolve(now, None, None, 3);
        assert_eq!((neither.from, neither.to), (at(9, 0, 0), now));
    }

    #[test]
    fn search_query_defaults_to_match_all() {
        let window = TimeWindow::lookback(at(12, 0, 0), 24);
        assert_eq!(SearchQuery::build(None, window, 100, None).query, "*");
        assert_eq!(SearchQuery::build(Some("  "), window, 100, None).query, "*");
        assert_eq!(
            SearchQuery::build(Some("level:error"), window, 100, None).query,
            "level:error"
        );
    }

    #[test]
    fn search_params_include_sources_when_set() {
        let window = TimeWindow::lookback(at(12, 0, 0), 1);
        let q = SearchQuery::build(None, window, 50, Some("123,456".into()));
        let params = q.params();
        assert_eq!(params[0], ("query", "*".to_string()));
        assert_eq!(params[1], ("from", "2024-01-15T11:00:00Z".to_string()));
        assert_eq!(params[2], ("to", "2024-01-15T12:00:00Z".to_string()));
        assert_eq!(params[3], ("limit", "50".to_string()));
        assert_eq!(params[4], ("sources", "123,456".to_string()));

        let no_sources = SearchQuery::build(None, window, 50, None);
        assert_eq!(no_sources.params().len(), 4);
    }

    #[test]
    fn sql_with_limit() {
        let window = TimeWindow::resolve(at(12, 0, 0), None, None, 1);
        let sql = SqlQuery::build("t123_vercel", &window, SortOrder::Desc, Some(100));
        assert_eq!(
            sql.statement,
            "SELECT dt, raw FROM remote(t123_vercel_logs) \
             WHERE dt >= parseDateTime64BestEffort('2024-01-15T11:00:00Z') \
             AND dt < parseDateTime64BestEffort('2024-01-15T12:00:00Z') \
             ORDER BY dt DESC LIMIT 100 FORMAT JSONEachRow"
        );
    }

    #[test]
    fn sql_without_limit_has_no_limit_clause() {
        let window = TimeWindow::resolve(at(12, 0, 0), Some(at(8, 0, 0)), Some(at(9, 0, 0)), 1);
        let sql = SqlQuery::build("t1", &window, SortOrder::Asc, None);
        assert!(!sql.statement.contains("LIMIT"));
        assert!(sql.statement.contains("ORDER BY dt ASC"));
        assert!(sql.statement.ends_with("FORMAT JSONEachRow"));
    }

    #[test]
    fn sort_order_parse() {
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("newest".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
