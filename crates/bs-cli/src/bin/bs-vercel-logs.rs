//! bs-vercel-logs - query Vercel request logs stored in Better Stack.

use clap::Parser;
use std::io;
use std::process::ExitCode;

use bs_cli::telemetry;
use bs_cli::vercel_cmd::{self, VercelArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = VercelArgs::parse();
    telemetry::init(args.verbose, args.log_json);

    let mut out = io::BufWriter::new(io::stdout().lock());
    match vercel_cmd::run(&args, |name| std::env::var(name).ok(), &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "bs-vercel-logs failed");
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
