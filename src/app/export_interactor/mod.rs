// Export interactor - Orchestrates the cut-and-join export use case

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::total_length;
use crate::engine::progress::{extraction_progress, CONCAT_RUNNING, CONCAT_STARTED};
use crate::engine::{extractor_for, part_file_name, ConcatJoiner, EncodeSettings, ProgressMonitor};
use crate::ports::*;

/// Prefix of the per-export scratch directory
pub const WORKSPACE_PREFIX: &str = "cutx_";

/// Everything one export needs, captured when the job starts
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Kept segments in order; usually `CutList::keep_segments`
    pub segments: Vec<Interval>,
    /// Transcoder path or bare program name
    pub executable: String,
    pub strategy: TrimStrategy,
    pub encode: EncodeSettings,
}

/// Summary of a finished export
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub output: PathBuf,
    pub strategy: TrimStrategy,
    pub segments: usize,
    pub kept_seconds: f64,
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: f64,
}

/// Interactor for the export use case
pub struct ExportInteractor {
    process_port: Arc<dyn ProcessPort>,
    locator_port: Arc<dyn LocatorPort>,
    joiner: ConcatJoiner,
    temp_root: Option<PathBuf>,
}

impl ExportInteractor {
    /// Create new export interactor with injected ports
    pub fn new(process_port: Arc<dyn ProcessPort>, locator_port: Arc<dyn LocatorPort>) -> Self {
        Self {
            process_port,
            locator_port,
            joiner: ConcatJoiner::new(),
            temp_root: None,
        }
    }

    /// Create workspaces under `root` instead of the system temp dir
    pub fn with_temp_root(mut self, root: Option<PathBuf>) -> Self {
        self.temp_root = root;
        self
    }

    /// Extract every kept segment, then join the parts into `request.output`.
    ///
    /// Progress delivered to `sink` is strictly increasing and ends at exactly
    /// 1.0 on success. The scratch workspace is gone when this returns,
    /// whatever the outcome.
    pub async fn export(
        &self,
        request: ExportRequest,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<ExportReport, DomainError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        if request.segments.is_empty() {
            return Err(DomainError::EmptyResult);
        }
        let executable = self.locator_port.locate(&request.executable)?;
        if !request.source.is_file() {
            return Err(DomainError::SourceNotFound {
                path: request.source.display().to_string(),
            });
        }

        let span = info_span!(
            "export",
            source = %request.source.display(),
            output = %request.output.display(),
            segments = request.segments.len(),
            strategy = %request.strategy,
        );
        let monitor = ProgressMonitor::new(sink);

        let outcome = async {
            info!("Starting export of {} segments", request.segments.len());
            let workspace = self.create_workspace()?;
            debug!("Workspace: {}", workspace.path().display());

            let result = self
                .run_pipeline(&request, &executable, workspace.path(), &monitor, cancel)
                .await;
            close_workspace(workspace);
            result
        }
        .instrument(span)
        .await;

        match outcome {
            Ok(()) => {
                monitor.complete();
                let report = ExportReport {
                    output: request.output,
                    strategy: request.strategy,
                    segments: request.segments.len(),
                    kept_seconds: total_length(&request.segments).seconds,
                    started_at,
                    elapsed_seconds: clock.elapsed().as_secs_f64(),
                };
                info!(
                    "Export finished in {:.2}s: {}",
                    report.elapsed_seconds,
                    report.output.display()
                );
                Ok(report)
            }
            Err(e) if e.is_canceled() => {
                monitor.enter(ExportPhase::Canceled);
                info!("Export canceled");
                Err(e)
            }
            Err(e) => {
                monitor.enter(ExportPhase::Failed);
                warn!("Export failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        request: &ExportRequest,
        executable: &Path,
        workspace: &Path,
        monitor: &ProgressMonitor<'_>,
        cancel: &CancelToken,
    ) -> Result<(), DomainError> {
        let total = request.segments.len();
        let extractor = extractor_for(request.strategy, &request.encode);
        let mut parts = Vec::with_capacity(total);

        for (index, segment) in request.segments.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(DomainError::Canceled);
            }

            let phase = ExportPhase::ExtractingSegment { index, total };
            monitor.enter(phase);
            info!("{}: {}", phase, segment);
            monitor.report(extraction_progress(index, total, 0.0));

            let part = workspace.join(part_file_name(index, &request.output));
            let invocation = Invocation::new(
                executable,
                extractor.extract_args(&request.source, segment, &part),
            );
            let on_progress = |update: ProgressUpdate| {
                if let Some(fraction) = update.fraction {
                    monitor.report(extraction_progress(index, total, fraction));
                }
            };
            self.process_port
                .run(&invocation, Some(segment.length()), &on_progress, cancel)
                .await?;

            monitor.report(extraction_progress(index, total, 1.0));
            parts.push(part);
        }

        if cancel.is_cancelled() {
            return Err(DomainError::Canceled);
        }

        let manifest = self.joiner.write_manifest(workspace, &parts).await?;
        monitor.enter(ExportPhase::Concatenating);
        info!("Joining {} parts", parts.len());
        monitor.report(CONCAT_STARTED);

        let invocation = Invocation::new(
            executable,
            self.joiner.concat_args(&manifest, &request.output),
        );
        // The joined length is not tracked, so any marker means "running"
        let on_progress = |_update: ProgressUpdate| monitor.report(CONCAT_RUNNING);
        self.process_port
            .run(&invocation, None, &on_progress, cancel)
            .await
    }

    fn create_workspace(&self) -> Result<TempDir, DomainError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let workspace = match &self.temp_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(workspace)
    }
}

fn close_workspace(workspace: TempDir) {
    let path = workspace.path().to_path_buf();
    if let Err(e) = workspace.close() {
        debug!("Failed to remove workspace {}: {}", path.display(), e);
    }
}
