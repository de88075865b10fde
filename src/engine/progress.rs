//! Overall progress aggregation across the multi-process export

use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::domain::model::ExportPhase;
use crate::ports::ProgressSink;

/// Share of the progress range reserved for segment extraction
pub const EXTRACTION_SHARE: f64 = 0.95;
/// Reported when the concatenation step starts
pub const CONCAT_STARTED: f64 = 0.96;
/// Reported while the concatenation step is running
pub const CONCAT_RUNNING: f64 = 0.98;

/// Map one part's progress into the overall extraction range
pub fn extraction_progress(index: usize, total: usize, part_fraction: f64) -> f64 {
    let total = total.max(1) as f64;
    let part = if part_fraction.is_finite() {
        part_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((index as f64 + part) / total) * EXTRACTION_SHARE
}

/// Wraps a sink so it only ever sees non-decreasing values, and nothing
/// after the job reaches a terminal phase
pub struct ProgressMonitor<'a> {
    sink: &'a dyn ProgressSink,
    state: Mutex<MonitorState>,
}

struct MonitorState {
    last: Option<f64>,
    phase: ExportPhase,
}

impl<'a> ProgressMonitor<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            state: Mutex::new(MonitorState {
                last: None,
                phase: ExportPhase::Idle,
            }),
        }
    }

    /// Forward `value` if it advances the overall progress
    pub fn report(&self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let value = value.clamp(0.0, 1.0);

        let mut state = self.lock();
        if state.phase.is_terminal() {
            return;
        }
        if state.last.map_or(true, |last| value > last) {
            state.last = Some(value);
            self.sink.report(value);
        }
    }

    /// Record a phase transition; terminal phases are final
    pub fn enter(&self, phase: ExportPhase) {
        let mut state = self.lock();
        if state.phase.is_terminal() {
            return;
        }
        state.phase = phase;
        self.sink.phase(phase);
    }

    /// Report exactly 1.0 and close the job as done
    pub fn complete(&self) {
        self.report(1.0);
        self.enter(ExportPhase::Done);
    }

    pub fn phase(&self) -> ExportPhase {
        self.lock().phase
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Event delivered through [`ChannelProgressSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    Progress(f64),
    Phase(ExportPhase),
}

/// Progress sink that forwards events to a channel consumer such as a UI task.
///
/// Sending never blocks the transcoder reader.
#[derive(Debug, Clone)]
pub struct ChannelProgressSink {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgressSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgressSink {
    fn report(&self, fraction: f64) {
        let _ = self.tx.send(ProgressEvent::Progress(fraction));
    }

    fn phase(&self, phase: ExportPhase) {
        let _ = self.tx.send(ProgressEvent::Phase(phase));
    }
}
