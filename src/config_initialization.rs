//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::AppConfig;
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::model::TrimStrategy;

/// Environment variables mapped onto config fields
pub const ENV_FFMPEG: &str = "CUTX_FFMPEG";
pub const ENV_MODE: &str = "CUTX_MODE";
pub const ENV_TEMP_DIR: &str = "CUTX_TEMP_DIR";
pub const ENV_LOG_LEVEL: &str = "CUTX_LOG_LEVEL";
pub const ENV_CRF: &str = "CUTX_CRF";

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    let mut config =
        AppConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;

    let env_overrides = apply_environment_overrides(&mut config, |key| std::env::var(key).ok())?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, cli);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Apply `CUTX_*` variables found through `lookup`; returns how many were applied
pub fn apply_environment_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    if let Some(value) = lookup(ENV_FFMPEG) {
        config.ffmpeg_path = value;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_MODE) {
        config.default_mode = TrimStrategy::parse(&value)?;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_TEMP_DIR) {
        config.temp_dir = Some(value.into());
        applied += 1;
    }
    if let Some(value) = lookup(ENV_LOG_LEVEL) {
        config.log_level = value;
        applied += 1;
    }
    if let Some(value) = lookup(ENV_CRF) {
        config.encode.crf = value
            .trim()
            .parse()
            .map_err(|e| DomainError::Config(format!("Invalid {} value: {}", ENV_CRF, e)))?;
        applied += 1;
    }

    Ok(applied)
}

/// Apply command-line overrides; returns how many were applied
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut applied = 0;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        applied += 1;
    }

    match &cli.command {
        Commands::Export(args) => {
            if let Some(ffmpeg) = &args.ffmpeg {
                config.ffmpeg_path = ffmpeg.clone();
                applied += 1;
            }
            if let Some(mode) = args.mode {
                config.default_mode = mode;
                applied += 1;
            }
            if let Some(crf) = args.crf {
                config.encode.crf = crf;
                applied += 1;
            }
            if let Some(dir) = &args.temp_dir {
                config.temp_dir = Some(dir.clone());
                applied += 1;
            }
        }
        Commands::Probe(args) => {
            if let Some(ffmpeg) = &args.ffmpeg {
                config.ffmpeg_path = ffmpeg.clone();
                applied += 1;
            }
        }
        Commands::Plan(_) => {}
    }

    applied
}
