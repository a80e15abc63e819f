//! CLI for the Trending Notifier.
//!
//! Fetches trending repositories once, renders the report and emails it.
//! Intended to be run from a scheduler such as cron.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trending_notifier::{Config, RunLock, RunSummary, Runner, RunnerError, DEFAULT_LOCK_NAME};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status for a run interrupted by Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

/// Trending Notifier - Email a report of trending GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file. Defaults and environment variables are
    /// used when omitted.
    #[arg(long, env = "NOTIFIER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Send a test message to verify SMTP settings, then exit.
    #[arg(long)]
    test_email: bool,

    /// Name of the single-instance lock file.
    #[arg(long, default_value = DEFAULT_LOCK_NAME)]
    lock_name: String,
}

/// What a successful invocation did.
enum Outcome {
    Report(RunSummary),
    TestEmail { dry_run: bool },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    // More than one rustls provider is compiled in, so one must be chosen up front
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    let args = Args::parse();

    let _lock = match RunLock::acquire(&args.lock_name) {
        Ok(lock) => lock,
        Err(e) => {
            error!(error = %e, "Refusing to start");
            return ExitCode::from(2);
        }
    };

    // `_lock` is dropped after whichever branch finishes
    tokio::select! {
        result = run(args) => match result {
            Ok(Outcome::Report(summary)) => {
                print_summary(&summary);
                ExitCode::SUCCESS
            }
            Ok(Outcome::TestEmail { dry_run }) => {
                if !dry_run {
                    info!("Test email sent");
                }
                ExitCode::SUCCESS
            }
            Err(e) if e.is_setup_error() => {
                error!(error = %e, "Setup failure");
                ExitCode::from(2)
            }
            Err(e) => {
                error!(error = %e, "Run failed");
                ExitCode::from(1)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, aborting run");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<Outcome, RunnerError> {
    let config = Config::load(args.config.as_deref())?;
    let runner = Runner::new(config, args.dry_run)?;

    if args.test_email {
        runner.send_test_email().await?;
        return Ok(Outcome::TestEmail {
            dry_run: args.dry_run,
        });
    }

    Ok(Outcome::Report(runner.run().await?))
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Mode: {}", summary.mode());
    println!("  Source: {}", summary.source.as_str());
    println!("  Language: {}", summary.language);
    println!("  Period: {}", summary.period.as_str());
    println!("  Repositories: {}", summary.repositories);
    println!("  Format: {}", summary.format.as_str());
    println!("  Subject: {}", summary.subject);

    if !summary.dry_run {
        println!("  Recipients: {}", summary.recipients);
        println!("  Delivered: {}", if summary.delivered { "yes" } else { "no" });
    }
}
