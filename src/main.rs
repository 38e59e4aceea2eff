use std::process::ExitCode;

use clap::Parser;
use profitcheck::cli::{execute, Cli};
use profitcheck::config::AppConfig;
use profitcheck::AppState;

fn init_tracing() {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "profitcheck=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let state = AppState::with_config(config);

    match execute(&cli.command, &state) {
        Ok(outcome) => {
            println!("{}", outcome.notice);
            for line in &outcome.lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}", e.notice());
            Ok(ExitCode::FAILURE)
        }
    }
}
