//! cutx CLI Video Cutter
//!
//! Removes time ranges from a video. Every kept segment is extracted by an
//! external transcoder, by stream copy or by a precise re-encode, and the
//! parts are joined into a new file.
//!
//! # Usage
//!
//! ```bash
//! cutx export --input talk.mp4 --cut 0-12.5 --cut 41:10-43:00
//! cutx plan --duration 1:00:00 --cut 10-20 --cut 15-30
//! cutx probe --input talk.mp4
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cutx_cli::adapters::init_logging;
use cutx_cli::app::DefaultAppContainer;
use cutx_cli::cli::{commands, Cli, Commands};
use cutx_cli::config_initialization::initialize_configuration_hierarchy;
use cutx_cli::DomainError;

/// Exit status used when the user interrupts an export
const EXIT_CANCELED: u8 = 130;

/// Main entry point for the cutx CLI application
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let canceled = e
                .downcast_ref::<DomainError>()
                .is_some_and(DomainError::is_canceled);
            if canceled {
                eprintln!("Export canceled");
                ExitCode::from(EXIT_CANCELED)
            } else {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.log_level, cli.log_json)?;

    info!("Starting cutx");
    let container = DefaultAppContainer::new(&config);

    // Execute the requested command
    match cli.command {
        Commands::Export(args) => {
            info!("Executing export command");
            commands::export(args, &config, &container).await
        }
        Commands::Plan(args) => {
            info!("Executing plan command");
            commands::plan(args)
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(args, &config, &container).await
        }
    }
}
