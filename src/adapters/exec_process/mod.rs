//! Child-process execution adapter
//!
//! Runs one transcoder process with tokio, draining its diagnostic stream
//! while waiting for exit so a full pipe buffer can never stall the child.

use std::collections::VecDeque;
use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Marker the transcoder prints before the current media position
const PROGRESS_MARKER: &str = "time=";

/// Diagnostic lines kept for the failure log
const DEFAULT_TAIL_LINES: usize = 20;

/// tokio-based process runner
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    tail_lines: usize,
}

impl TokioProcessRunner {
    /// Create new process runner
    pub fn new() -> Self {
        Self {
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessPort for TokioProcessRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        expected: Option<TimeSpec>,
        on_progress: &(dyn Fn(ProgressUpdate) + Send + Sync),
        cancel: &CancelToken,
    ) -> Result<(), DomainError> {
        if cancel.is_cancelled() {
            return Err(DomainError::Canceled);
        }

        debug!("Running: {}", invocation);
        let program = invocation.program.display().to_string();

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| spawn_error(&program, e))?;

        let stderr = child.stderr.take().ok_or_else(|| {
            DomainError::Io(io::Error::new(
                io::ErrorKind::Other,
                "diagnostic stream was not captured",
            ))
        })?;

        let tail_limit = self.tail_lines;
        let outcome = tokio::select! {
            (status, tail) = async {
                tokio::join!(
                    child.wait(),
                    drain_diagnostics(stderr, expected, on_progress, tail_limit),
                )
            } => Some((status, tail)),
            _ = cancel.cancelled() => None,
        };

        let Some((status, tail)) = outcome else {
            warn!("Cancellation requested, stopping {}", program);
            if let Err(e) = child.kill().await {
                debug!("Failed to kill {}: {}", program, e);
            }
            return Err(DomainError::Canceled);
        };

        let status = status?;
        if status.success() {
            debug!("{} exited successfully", program);
            return Ok(());
        }

        // Killed by a signal has no exit code
        let code = status.code().unwrap_or(-1);
        warn!("{} exited with code {}", program, code);
        for line in &tail {
            warn!("  {}", line);
        }
        Err(DomainError::ProcessFailure { code })
    }
}

fn spawn_error(program: &str, error: io::Error) -> DomainError {
    match error.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            DomainError::ExecutableNotFound {
                program: program.to_string(),
            }
        }
        _ => DomainError::Io(error),
    }
}

/// Read the diagnostic stream to EOF, reporting progress markers.
///
/// Returns the last `tail_limit` non-empty lines.
async fn drain_diagnostics<R>(
    mut reader: R,
    expected: Option<TimeSpec>,
    on_progress: &(dyn Fn(ProgressUpdate) + Send + Sync),
    tail_limit: usize,
) -> VecDeque<String>
where
    R: AsyncRead + Unpin,
{
    let mut splitter = LineSplitter::default();
    let mut tail = VecDeque::with_capacity(tail_limit);
    let mut buf = [0u8; 8192];

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                for line in splitter.push(&buf[..n]) {
                    handle_line(line, expected, on_progress, &mut tail, tail_limit);
                }
            }
            Err(e) => {
                debug!("Diagnostic stream read failed: {}", e);
                break;
            }
        }
    }
    if let Some(line) = splitter.finish() {
        handle_line(line, expected, on_progress, &mut tail, tail_limit);
    }

    tail
}

fn handle_line(
    line: String,
    expected: Option<TimeSpec>,
    on_progress: &(dyn Fn(ProgressUpdate) + Send + Sync),
    tail: &mut VecDeque<String>,
    tail_limit: usize,
) {
    trace!("{}", line);

    if let Some(position) = parse_progress_marker(&line) {
        let fraction = expected
            .filter(|e| e.seconds > 0.0)
            .map(|e| (position.seconds / e.seconds).clamp(0.0, 1.0));
        on_progress(ProgressUpdate { position, fraction });
    }

    if tail_limit > 0 {
        if tail.len() == tail_limit {
            tail.pop_front();
        }
        tail.push_back(line);
    }
}

/// Position from the first `time=` marker on a line, if it parses
pub fn parse_progress_marker(line: &str) -> Option<TimeSpec> {
    let start = line.to_ascii_lowercase().find(PROGRESS_MARKER)? + PROGRESS_MARKER.len();
    let token = line[start..].split(char::is_whitespace).next()?;
    if token.is_empty() {
        return None;
    }
    TimeSpec::parse(token).ok()
}

/// Splits a byte stream into lines on `\n` or `\r`.
///
/// The transcoder rewrites its status line with carriage returns, so both
/// terminators end a line. Empty lines are skipped and invalid UTF-8 is
/// replaced.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in bytes {
            if byte == b'\n' || byte == b'\r' {
                if !self.pending.is_empty() {
                    lines.push(String::from_utf8_lossy(&self.pending).into_owned());
                    self.pending.clear();
                }
            } else {
                self.pending.push(byte);
            }
        }
        lines
    }

    /// Flush the unterminated remainder
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(line)
    }
}
