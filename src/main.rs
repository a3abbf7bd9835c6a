//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `profile_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C cancellation
//! - JSON output on stdout
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use profile_check::config::ErrorsAction;
use profile_check::error_log::{ErrorLog, FileErrorLog};
use profile_check::initialization::{init_client, init_logger_with, init_profile_context};
use profile_check::{
    analyze_profile, test_url_accessibility, validate_url, Cli, Command, Config, ProfileError,
    ValidationResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (e.g. RUST_LOG) from .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(
        cli.config.log_level.clone().into(),
        cli.config.log_format.clone(),
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = cli.config.validate() {
        eprintln!("profile_check error: {e}");
        process::exit(2);
    }

    match run(cli.config, cli.command).await {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("profile_check error: {e:#}");
            process::exit(1);
        }
    }
}

/// Runs one command. `Ok(false)` means the command ran but reported a failure.
async fn run(config: Config, command: Command) -> Result<bool> {
    match command {
        Command::Validate { urls } => {
            let mut all_valid = true;
            for url in &urls {
                let result = ValidationResult::from(validate_url(url));
                all_valid &= result.is_valid();
                println!("{}", serde_json::to_string(&result)?);
            }
            Ok(all_valid)
        }
        Command::Probe { url } => {
            let normalized = match validate_url(&url) {
                Ok(normalized) => normalized,
                Err(e) => {
                    print_json(&ProfileError::from(e).notice())?;
                    return Ok(false);
                }
            };
            let client = init_client(&config).context("Failed to build HTTP client")?;
            let result = test_url_accessibility(&client, &config.probe_config(), &normalized).await;
            print_json(&result)?;
            Ok(true)
        }
        Command::Analyze { url, context } => {
            let ctx = init_profile_context(&config).context("Failed to initialize analysis")?;
            let cancel = CancellationToken::new();
            let ctrl_c = spawn_ctrl_c_handler(cancel.clone());

            let outcome = analyze_profile(&ctx, &url, context.as_deref(), &cancel).await;
            ctrl_c.abort();

            match outcome {
                Ok(report) => {
                    print_json(&report)?;
                    Ok(true)
                }
                Err(e) => {
                    print_json(&e.notice())?;
                    Ok(false)
                }
            }
        }
        Command::Errors { action } => {
            let log = FileErrorLog::new(&config.error_log);
            match action {
                ErrorsAction::List => print_json(&log.get_all())?,
                ErrorsAction::Clear => {
                    log.clear();
                    info!("Cleared error log {}", log.path().display());
                }
            }
            Ok(true)
        }
    }
}

/// Cancels `cancel` on the first Ctrl-C.
fn spawn_ctrl_c_handler(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling pending analysis");
            cancel.cancel();
        }
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to encode output")?
    );
    Ok(())
}
