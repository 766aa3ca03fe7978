use interview::cli::{Cli, Command, ServeArgs};
use interview::commands::{self, Context};
use interview::error::InterviewError;
use interview::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize};

use interview_core::config::{AppConfig, default_config_dir};

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::io::stdout;
use std::panic::Location;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info, warn};

const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            if json {
                match serde_json::to_string_pretty(&e) {
                    Ok(encoded) => println!("{encoded}"),
                    Err(_) => eprintln!("{e}"),
                }
            } else {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool, InterviewError> {
    let config_dir = cli.config_dir.unwrap_or_else(default_config_dir);
    let log_dir = cli
        .log_dir
        .unwrap_or_else(|| config_dir.join(LOG_DIR_NAME));

    // Ensure log directory exists
    create_dir_all(&log_dir).map_err(|e| InterviewError::Interview {
        message: format!("Failed to create log directory: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, cli.log_level.map_or(DEFAULT_LOG_LEVEL, LevelFilter::from))?;

    info!("Interview {} starting", env!("CARGO_PKG_VERSION"));
    info!("Config directory: {}", config_dir.display());
    info!("Log directory: {}", log_dir.display());

    let config = AppConfig::resolve(&config_dir)?;
    let context = Context {
        config,
        config_dir,
        json: cli.json,
    };

    let mut out = stdout().lock();

    match cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    {
        Command::Serve(args) => {
            commands::serve::execute(&context, &args, shutdown_signal()).await?;
            Ok(true)
        }
        Command::Run(args) => commands::run::execute(&context, &args, &mut out).await,
        Command::Runtimes => {
            commands::runtimes::execute(&context, &mut out).await?;
            Ok(true)
        }
        Command::Problems => {
            commands::problems::execute(&context, &mut out)?;
            Ok(true)
        }
        Command::RepoId(args) => {
            commands::repo_id::execute(&context, &args, &mut out)?;
            Ok(true)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
