//! `bs-vercel-logs`: build SQL, POST it, filter locally, render.

use chrono::{DateTime, Utc};
use clap::Parser;
use std::io::Write;

use bs_client::{Environment, QueryConfig, SqlClient};
use bs_log_tools::query::{clamp_hours, clamp_limit, parse_time_arg};
use bs_log_tools::render::{write_compact, write_json, write_table};
use bs_log_tools::{
    FilterCriteria, LogLevel, LogQuery, LogSource, OutputFormat, SortOrder, SqlQuery, StatusClass,
    TimeWindow,
};

use crate::error::CliResult;
use crate::man::VERCEL_MAN;

/// Row limit when `--n` is absent and the window is not fully bounded.
pub const DEFAULT_LIMIT: u32 = 100;

/// bs-vercel-logs - query Vercel request logs in Better Stack via SQL
#[derive(Parser, Debug, Clone)]
#[command(name = "bs-vercel-logs")]
#[command(author, version, about, long_about = None)]
pub struct VercelArgs {
    /// Environment whose table prefix is queried
    #[arg(long, default_value = "prod")]
    pub env: Environment,

    /// Number of rows to return (clamped to 1..=500)
    #[arg(short = 'n', long = "n", allow_negative_numbers = true)]
    pub n: Option<i64>,

    /// Lookback window in hours (clamped to 1..=168)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub hours: i64,

    /// Window start (inclusive)
    #[arg(long, value_parser = parse_time_arg)]
    pub since: Option<DateTime<Utc>>,

    /// Window end (exclusive)
    #[arg(long, value_parser = parse_time_arg)]
    pub before: Option<DateTime<Utc>>,

    /// Sort order by timestamp
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Send this SQL statement verbatim instead of the generated one
    #[arg(long)]
    pub sql: Option<String>,

    /// Minimum level (debug, info, notice, warning, error, critical, fatal)
    #[arg(long)]
    pub level: Option<LogLevel>,

    /// Vercel source(s), comma-separated
    #[arg(long = "source", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Status class(es) such as 5xx, comma-separated
    #[arg(long = "status-class", value_delimiter = ',')]
    pub status_classes: Vec<StatusClass>,

    /// Minimum HTTP status code
    #[arg(long)]
    pub min_status: Option<i64>,

    /// HTTP method
    #[arg(long)]
    pub method: Option<String>,

    /// Exact request path
    #[arg(long)]
    pub path: Option<String>,

    /// Request path substring
    #[arg(long)]
    pub path_contains: Option<String>,

    /// Message substring
    #[arg(long)]
    pub contains: Option<String>,

    /// Vercel deployment id
    #[arg(long)]
    pub deployment: Option<String>,

    /// Vercel environment (production, preview, ...)
    #[arg(long)]
    pub environment: Option<String>,

    /// Output format: table, json, or compact
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,

    /// Debug diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,

    /// Diagnostics as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Print the extended help page and exit
    #[arg(long)]
    pub man: bool,
}

impl VercelArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_level: self.level,
            sources: self
                .sources
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            status_classes: self.status_classes.clone(),
            min_status: self.min_status,
            method: self.method.clone(),
            path: self.path.clone(),
            path_contains: self.path_contains.clone(),
            contains: self.contains.clone(),
            deployment_id: self.deployment.clone(),
            environment: self.environment.clone(),
        }
    }

    /// Final row cap. `None` means every row in an explicit window.
    pub fn limit(&self) -> Option<u32> {
        match self.n {
            Some(n) => Some(clamp_limit(n)),
            None if self.since.is_some() && self.before.is_some() => None,
            None => Some(DEFAULT_LIMIT),
        }
    }

    pub fn window(&self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow::resolve(now, self.since, self.before, clamp_hours(self.hours))
    }

    /// The statement to send: `--sql` verbatim, or the generated query.
    pub fn statement(&self, table_prefix: &str, now: DateTime<Utc>) -> SqlQuery {
        match self.sql.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(sql) => SqlQuery::verbatim(sql),
            None => SqlQuery::build(
                table_prefix,
                &self.window(now),
                self.order,
                self.criteria().fetch_limit(self.limit()),
            ),
        }
    }
}

/// Full run: config from `lookup`, one SQL request, output to `out`.
pub async fn run<F, W>(args: &VercelArgs, lookup: F, out: &mut W) -> CliResult<()>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if args.man {
        out.write_all(VERCEL_MAN.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let config = QueryConfig::from_lookup(args.env, lookup)?;
    tracing::debug!(config = ?config, env = %args.env, "query config loaded");
    let table_prefix = config.table_prefix.clone();
    let client = SqlClient::new(config)?;

    execute(args, &client, &table_prefix, Utc::now(), out).await
}

/// Fetch from `source`, filter, cap, and render.
pub async fn execute<W: Write>(
    args: &VercelArgs,
    source: &dyn LogSource,
    table_prefix: &str,
    now: DateTime<Utc>,
    out: &mut W,
) -> CliResult<()> {
    let criteria = args.criteria();
    let limit = args.limit();
    let query = args.statement(table_prefix, now);

    let batch = source.fetch(&LogQuery::Sql(query)).await?;
    let fetched = batch.len();

    let mut rows = criteria.apply(batch.rows);
    if let Some(limit) = limit {
        rows.truncate(limit as usize);
    }
    tracing::debug!(
        source = source.name(),
        fetched,
        shown = rows.len(),
        "rows after filtering"
    );

    match args.format {
        OutputFormat::Table => write_table(out, &rows)?,
        OutputFormat::Json => write_json(out, &rows)?,
        OutputFormat::Compact => write_compact(out, &rows, batch.meta.as_ref())?,
    }
    out.flush()?;
    Ok(())
}
