//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `host_audit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and the exit-code policy
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use host_audit::initialization::init_logger_with;
use host_audit::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(summary) => {
            println!(
                "Audited {} domain{} ({} succeeded, {} degraded) in {:.1}s",
                summary.domains_run,
                if summary.domains_run == 1 { "" } else { "s" },
                summary.succeeded,
                summary.failed,
                summary.elapsed_seconds
            );
            println!("Report saved to {}", summary.report_path.display());

            // A degraded domain is partial success: the report was still
            // written, so it gets its own exit code.
            if summary.failed > 0 {
                process::exit(2);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("host_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
