//! bs-logs - print recent Better Stack logs from the search API.

use clap::Parser;
use std::io;
use std::process::ExitCode;

use bs_cli::search_cmd::{self, SearchArgs};
use bs_cli::telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = SearchArgs::parse();
    telemetry::init(args.verbose, args.log_json);

    let mut out = io::BufWriter::new(io::stdout().lock());
    match search_cmd::run(&args, |name| std::env::var(name).ok(), &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "bs-logs failed");
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
