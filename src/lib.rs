//! cutx Video Cutter Library
//!
//! Removes a set of time ranges from a video by extracting the ranges to keep
//! with an external transcoder and joining the parts, with monotonic progress
//! reporting and cooperative cancellation.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod ports;

// Re-export commonly used types
pub use app::{ExportInteractor, ExportReport, ExportRequest};
pub use domain::errors::DomainError;
pub use domain::model::{CutList, ExportPhase, Interval, TimeSpec, TrimStrategy};
pub use ports::{CancelToken, ProgressSink};
