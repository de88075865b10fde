// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Check a level name accepted by `--log-level` and the config file
pub fn validate_log_level(level: &str) -> Result<(), DomainError> {
    let normalized = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(DomainError::Config(format!(
            "Invalid log level: {}. Valid levels: {}",
            level,
            LOG_LEVELS.join(", ")
        )))
    }
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless:
/// the second subscriber is simply not installed.
pub fn init_logging(level: &str, json: bool) -> Result<(), DomainError> {
    validate_log_level(level)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.trim().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    Ok(())
}
