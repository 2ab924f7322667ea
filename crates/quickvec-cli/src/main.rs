//! quickvec - Main entry point

use clap::Parser;
use quickvec_cli::{workflow, Cli, Config};
use quickvec_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Info })
        .output(LogOutput::Console)
        .log_file_prefix("quickvec")
        .build();

    // Environment variables take precedence over the flag-derived defaults
    let log_config = match log_config.clone().with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring logging environment: {}", e);
            log_config
        },
    };

    // The CLI should work without logging
    let guard = init_logging(&log_config).ok();

    if let Err(e) = execute(&cli).await {
        error!(error = %e, "Workflow failed");
        eprintln!("Error: {}", e);
        // Flush file logs; exit skips destructors
        drop(guard);
        process::exit(1);
    }
}

async fn execute(cli: &Cli) -> quickvec_cli::Result<()> {
    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    workflow::run(&config).await?;
    Ok(())
}
