//! `bs-logs`: build query, GET, render.

use chrono::{DateTime, Utc};
use clap::Parser;
use std::io::Write;

use bs_client::{Environment, SearchClient, SearchConfig};
use bs_log_tools::query::{clamp_hours, clamp_limit};
use bs_log_tools::render::{write_compact, write_json, write_table};
use bs_log_tools::{LogQuery, LogSource, OutputFormat, SearchQuery, TimeWindow};

use crate::error::CliResult;
use crate::man::SEARCH_MAN;

/// bs-logs - fetch the last N Better Stack logs via the search API
#[derive(Parser, Debug, Clone)]
#[command(name = "bs-logs")]
#[command(author, version, about, long_about = None)]
pub struct SearchArgs {
    /// Environment whose source id scopes the search
    #[arg(long, default_value = "prod")]
    pub env: Environment,

    /// Number of lines to fetch (clamped to 1..=500)
    #[arg(short = 'n', long = "n", default_value_t = 100, allow_negative_numbers = true)]
    pub n: i64,

    /// Lookback window in hours (clamped to 1..=168)
    #[arg(long, default_value_t = 24, allow_negative_numbers = true)]
    pub hours: i64,

    /// Optional Better Stack query string, sent verbatim
    #[arg(long)]
    pub q: Option<String>,

    /// Output format: compact, table, or json
    #[arg(long, default_value = "compact")]
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

impl SearchArgs {
    /// Resolve flags into a ready-to-send query.
    pub fn build_query(&self, now: DateTime<Utc>, sources: Option<String>) -> SearchQuery {
        let window = TimeWindow::lookback(now, clamp_hours(self.hours));
        SearchQuery::build(self.q.as_deref(), window, clamp_limit(self.n), sources)
    }
}

/// Full run: config from `lookup`, one search request, output to `out`.
///
/// Configuration is resolved before the client exists, so a missing token
/// never reaches the network.
pub async fn run<F, W>(args: &SearchArgs, lookup: F, out: &mut W) -> CliResult<()>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    if args.man {
        out.write_all(SEARCH_MAN.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let config = SearchConfig::from_lookup(args.env, lookup)?;
    tracing::debug!(config = ?config, env = %args.env, "search config loaded");
    let sources = config.source_id.clone();
    let client = SearchClient::new(config)?;

    execute(args, &client, sources, Utc::now(), out).await
}

/// Fetch from `source` and render. Separate from `run` so tests can inject a source.
pub async fn execute<W: Write>(
    args: &SearchArgs,
    source: &dyn LogSource,
    sources: Option<String>,
    now: DateTime<Utc>,
    out: &mut W,
) -> CliResult<()> {
    let query = args.build_query(now, sources);
    let batch = source.fetch(&LogQuery::Search(query)).await?;
    tracing::debug!(source = source.name(), rows = batch.len(), "fetched");

    match args.format {
        OutputFormat::Compact => write_compact(out, &batch.rows, batch.meta.as_ref())?,
        OutputFormat::Table => write_table(out, &batch.rows)?,
        OutputFormat::Json => write_json(out, &batch.rows)?,
    }
    out.flush()?;
    Ok(())
}
