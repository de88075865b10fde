// Inspect interactor - Orchestrates media duration lookup

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Result of inspecting one source file
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub source: PathBuf,
    pub duration: TimeSpec,
    /// Human readable form of `duration`
    pub formatted: String,
}

/// Interactor for media inspection use case
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    locator_port: Arc<dyn LocatorPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, locator_port: Arc<dyn LocatorPort>) -> Self {
        Self {
            probe_port,
            locator_port,
        }
    }

    /// Resolve the transcoder, then ask it for the total duration of `source`
    pub async fn inspect(&self, executable: &str, source: &Path) -> Result<InspectReport, DomainError> {
        let executable = self.locator_port.locate(executable)?;
        let duration = self.probe_port.probe_duration(&executable, source).await?;
        info!("{}: {}", source.display(), duration);

        Ok(InspectReport {
            source: source.to_path_buf(),
            duration,
            formatted: duration.format_hms(),
        })
    }
}
