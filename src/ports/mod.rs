// Ports - Interface definitions (contracts)

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::errors::*;
use crate::domain::model::*;

/// One external program call: executable plus argument vector
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// A progress marker seen on a process's diagnostic stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// Media position reported by the process
    pub position: TimeSpec,
    /// `position / expected`, clamped to [0, 1]; `None` when no duration was expected
    pub fraction: Option<f64>,
}

/// Cooperative cancellation signal shared between the caller and a running export
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Port for running one external transcoder process
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Run to completion, reporting progress markers as they appear.
    ///
    /// Returns `ProcessFailure` on a non-zero exit, `ExecutableNotFound` when
    /// the program cannot be started, and `Canceled` when the token fires
    /// while the process is running.
    async fn run(
        &self,
        invocation: &Invocation,
        expected: Option<TimeSpec>,
        on_progress: &(dyn Fn(ProgressUpdate) + Send + Sync),
        cancel: &CancelToken,
    ) -> Result<(), DomainError>;
}

/// Port for resolving the transcoder executable
pub trait LocatorPort: Send + Sync {
    /// Resolve an explicit path or a bare name looked up on the search path
    fn locate(&self, program: &str) -> Result<PathBuf, DomainError>;
}

/// Port for learning a media file's total duration
#[async_trait]
pub trait ProbePort: Send + Sync {
    async fn probe_duration(&self, executable: &Path, source: &Path)
        -> Result<TimeSpec, DomainError>;
}

/// Observer for overall export progress.
///
/// Called from whichever task is reading the transcoder output, so
/// implementations must be cheap and must not block.
pub trait ProgressSink: Send + Sync {
    /// Overall progress in [0, 1]
    fn report(&self, fraction: f64);

    /// Phase transitions of the export job
    fn phase(&self, _phase: ExportPhase) {}
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Send + Sync,
{
    fn report(&self, fraction: f64) {
        self(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_token_wakes_waiters() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!token.is_cancelled());
        token.cancel();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_after_cancel() {
        let token = CancelToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .unwrap();
    }

    #[test]
    fn test_invocation_display_quotes_spaces() {
        let invocation = Invocation::new(
            "ffmpeg",
            vec![OsString::from("-i"), OsString::from("my clip.mp4")],
        );
        assert_eq!(invocation.to_string(), "ffmpeg -i \"my clip.mp4\"");
    }
}
