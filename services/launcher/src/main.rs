//! Flood composer launcher binary.
//!
//! Loads run parameters from a JSON file, runs the pipeline against a
//! local workspace, and logs the final payload as JSON. Any error is
//! logged and turned into a failure exit status; a no-water early exit is
//! a success.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use launcher::{execute_run, RunOutcome, RunParameters};
use platform::{LocalCatalog, OfflineRunner};

#[derive(Parser, Debug)]
#[command(name = "launcher")]
#[command(about = "Flood composer pipeline launcher")]
struct Args {
    /// Run parameters file (JSON)
    #[arg(short, long)]
    params: String,

    /// Workspace directory holding the input and output products
    #[arg(short, long, default_value = ".")]
    workspace: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting flood composer launcher");

    // One handler for the whole run: log the error and exit non-zero
    // without re-raising.
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Launcher run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let params = RunParameters::from_file(&args.params)?;
    info!(floodmap = %params.floodmap, case = %params.case(), "Loaded run parameters");

    let catalog = LocalCatalog::new(&args.workspace);
    let runner = OfflineRunner;

    match execute_run(&params, &runner, &catalog)? {
        RunOutcome::Completed(payload) => {
            info!(payload = %serde_json::to_string(&payload)?, "Run completed");
        }
        RunOutcome::NoWater => {
            info!("No water in the input map; nothing to produce");
        }
    }
    Ok(())
}
