// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::path_search::DEFAULT_PROGRAM;
use crate::adapters::tracing_log::validate_log_level;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EncodeSettings;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "cutx.toml";

/// Application configuration, read from the `[cutx]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Transcoder executable: a path or a bare name looked up on PATH
    pub ffmpeg_path: String,
    pub default_mode: TrimStrategy,
    /// Parent directory for export workspaces; system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    pub log_level: String,
    /// Codec settings for precise trimming
    pub encode: EncodeSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: DEFAULT_PROGRAM.to_string(),
            default_mode: TrimStrategy::FastCopy,
            temp_dir: None,
            log_level: "info".to_string(),
            encode: EncodeSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ConfigFile {
    #[serde(default)]
    cutx: AppConfig,
}

impl AppConfig {
    /// Parse TOML content; a missing `[cutx]` table yields the defaults
    pub fn parse(toml_content: &str) -> Result<Self, DomainError> {
        let file: ConfigFile = toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))?;
        Ok(file.cutx)
    }

    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, else the first existing default location.
    ///
    /// An explicit path that does not exist is an error; missing default
    /// files just mean defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, DomainError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        for candidate in Self::default_locations() {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(path) = default_config_path() {
            locations.push(path);
        }
        locations
    }

    /// Serialize back to the `[cutx]` table form
    pub fn to_toml(&self) -> Result<String, DomainError> {
        toml::to_string(&ConfigFile { cutx: self.clone() })
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// A blank `ffmpeg_path` is allowed; the locator falls back to `ffmpeg`
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_log_level(&self.log_level)?;
        self.encode.validate()
    }
}

/// Per-user config file, e.g. `~/.config/cutx/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cutx").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ffmpeg_path, "ffmpeg");
        assert_eq!(config.default_mode, TrimStrategy::FastCopy);
        assert_eq!(config.encode.crf, 23);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_ffmpeg_path_is_accepted() {
        let config = AppConfig::parse("[cutx]\nffmpeg_path = \"\"\n").unwrap();
        assert_eq!(config.ffmpeg_path, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_table() {
        let config = AppConfig::parse(
            r#"
[cutx]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
default_mode = "precise"

[cutx.encode]
crf = 18
"#,
        )
        .unwrap();

        assert_eq!(config.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(config.default_mode, TrimStrategy::PreciseReencode);
        assert_eq!(config.encode.crf, 18);
        assert_eq!(config.encode.preset, "veryfast");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_without_table_gives_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let result = AppConfig::parse("[cutx]\ndefault_mode = \"sloppy\"\n");
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.encode.crf = 60;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml_reloads() {
        let mut config = AppConfig::default();
        config.temp_dir = Some(PathBuf::from("/var/tmp"));
        let text = config.to_toml().unwrap();
        assert!(text.contains("[cutx]"));
        assert_eq!(AppConfig::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_discover_explicit_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::discover(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cutx.toml");
        std::fs::write(&path, "[cutx]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().log_level, "debug");
    }
}
