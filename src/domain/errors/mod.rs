// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug)]
pub enum DomainError {
    /// Timestamp text matches neither the decimal nor the clock form
    #[error("Invalid time format: '{text}'. Expected seconds (90.5), HH:MM or HH:MM:SS(.ms)")]
    InvalidFormat { text: String },

    /// Numeric portion of a timestamp could not be parsed
    #[error("Invalid number in time '{text}': {reason}")]
    InvalidNumber { text: String, reason: String },

    /// Interval end is not after its start
    #[error("Invalid range: end ({end}) must be later than start ({start})")]
    InvalidRange { start: String, end: String },

    /// Nothing left to export once the cuts are applied
    #[error("Nothing to export: the cuts remove the whole video")]
    EmptyResult,

    /// Transcoder executable could not be resolved
    #[error("Transcoder executable not found: {program}")]
    ExecutableNotFound { program: String },

    /// Source media file does not exist
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    /// External process exited with a non-zero status
    #[error("Transcoder failed (exit code: {code})")]
    ProcessFailure { code: i32 },

    /// Cooperative cancellation was observed
    #[error("Export canceled")]
    Canceled,

    /// Media duration could not be determined
    #[error("Failed to probe media duration: {0}")]
    ProbeFailed(String),

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    /// Cancellation is a distinct outcome, not a failure
    pub fn is_canceled(&self) -> bool {
        matches!(self, DomainError::Canceled)
    }
}
