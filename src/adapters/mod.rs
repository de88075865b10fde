// Adapters - External system implementations

pub mod exec_process;
pub mod path_search;
pub mod probe_ffmpeg;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_process::TokioProcessRunner;
pub use path_search::PathSearchLocator;
pub use probe_ffmpeg::FfmpegDurationProbe;
pub use toml_config::AppConfig;
pub use tracing_log::{init_logging, validate_log_level};
