//! Command implementations

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::{AppContainer, ExportRequest};
use crate::cli::args::{ExportArgs, PlanArgs, ProbeArgs};
use crate::domain::errors::DomainError;
use crate::domain::model::{CutList, Interval, TimeSpec};
use crate::domain::rules::total_length;
use crate::engine::{ChannelProgressSink, ProgressEvent};
use crate::ports::CancelToken;

/// Execute the export command
pub async fn export(args: ExportArgs, config: &AppConfig, container: &dyn AppContainer) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    info!("Input: {}", args.input.display());
    info!("Output: {}", output.display());

    let total = match args.duration {
        Some(duration) => duration,
        None => {
            container
                .inspect_interactor()
                .inspect(&config.ffmpeg_path, &args.input)
                .await
                .context("Failed to determine input duration; pass --duration to skip probing")?
                .duration
        }
    };

    let cuts = CutList::from_intervals(args.cuts.iter().copied());
    let request = ExportRequest {
        source: args.input.clone(),
        output,
        segments: cuts.keep_segments(total),
        executable: config.ffmpeg_path.clone(),
        strategy: config.default_mode,
        encode: config.encode.clone(),
    };

    let cancel = CancelToken::new();
    let (sink, mut events) = ChannelProgressSink::channel();

    let interactor = container.export_interactor();
    let worker_cancel = cancel.clone();
    let worker = tokio::spawn(async move {
        interactor.export(request, &sink, &worker_cancel).await
    });

    let interrupt_cancel = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, canceling export");
            interrupt_cancel.cancel();
        }
    });

    // Ends when the worker drops its sink
    while let Some(event) = events.recv().await {
        render_progress(event);
    }

    let result = worker.await.context("Export task terminated unexpectedly")?;
    interrupt.abort();

    let report = result.context("Export failed")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Wrote {} ({} segments, {} kept, {:.1}s)",
            report.output.display(),
            report.segments,
            TimeSpec::from_seconds(report.kept_seconds),
            report.elapsed_seconds
        );
    }
    Ok(())
}

/// Merged cuts and resulting keep segments
#[derive(Debug, Serialize)]
struct PlanReport {
    duration: TimeSpec,
    cuts: Vec<Interval>,
    keep: Vec<Interval>,
    kept_seconds: f64,
}

/// Execute the plan command
pub fn plan(args: PlanArgs) -> Result<()> {
    let cuts = CutList::from_intervals(args.cuts);
    let keep = cuts.keep_segments(args.duration);
    if keep.is_empty() {
        return Err(DomainError::EmptyResult.into());
    }

    let report = PlanReport {
        duration: args.duration,
        cuts: cuts.intervals().to_vec(),
        kept_seconds: total_length(&keep).seconds,
        keep,
    };

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("Duration: {}", report.duration);
    println!("Cuts:");
    for cut in &report.cuts {
        println!("  {}", cut);
    }
    println!("Keep:");
    for segment in &report.keep {
        println!("  {}", segment);
    }
    println!("Kept: {}", TimeSpec::from_seconds(report.kept_seconds));
    Ok(())
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig, container: &dyn AppContainer) -> Result<()> {
    let report = container
        .inspect_interactor()
        .inspect(&config.ffmpeg_path, &args.input)
        .await
        .context("Failed to probe input")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.formatted);
    }
    Ok(())
}

/// `<dir>/<stem>_edited.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp4".to_string());
    input.with_file_name(format!("{}_edited.{}", stem, extension))
}

fn render_progress(event: ProgressEvent) {
    let mut stderr = std::io::stderr();
    let _ = match event {
        ProgressEvent::Progress(fraction) => write!(stderr, "\rProgress: {:5.1}%", fraction * 100.0),
        ProgressEvent::Phase(phase) if phase.is_terminal() => writeln!(stderr),
        ProgressEvent::Phase(_) => Ok(()),
    };
    let _ = stderr.flush();
}
