//! Duration probing through the transcoder's own input banner
//!
//! Opening a file with no output makes the transcoder print the container
//! header (including `Duration: HH:MM:SS.xx`) and exit with an error, so the
//! exit status is ignored and only the header is read.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const DURATION_HEADER: &str = "Duration:";

/// Probe adapter backed by the transcoder executable
#[derive(Debug, Default, Clone)]
pub struct FfmpegDurationProbe;

impl FfmpegDurationProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProbePort for FfmpegDurationProbe {
    async fn probe_duration(
        &self,
        executable: &Path,
        source: &Path,
    ) -> Result<TimeSpec, DomainError> {
        if !source.is_file() {
            return Err(DomainError::SourceNotFound {
                path: source.display().to_string(),
            });
        }

        debug!("Probing duration of {}", source.display());
        let output = Command::new(executable)
            .arg("-hide_banner")
            .arg("-i")
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    DomainError::ExecutableNotFound {
                        program: executable.display().to_string(),
                    }
                }
                _ => DomainError::Io(e),
            })?;

        let banner = String::from_utf8_lossy(&output.stderr);
        parse_duration_header(&banner).ok_or_else(|| {
            DomainError::ProbeFailed(format!(
                "no duration reported for {}",
                source.display()
            ))
        })
    }
}

/// First `Duration:` value in the transcoder banner; `N/A` and zero yield `None`
pub fn parse_duration_header(banner: &str) -> Option<TimeSpec> {
    banner.lines().find_map(|line| {
        let start = line.find(DURATION_HEADER)? + DURATION_HEADER.len();
        let token = line[start..]
            .trim_start()
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()?;
        TimeSpec::parse(token)
            .ok()
            .filter(|duration| duration.seconds > 0.0)
    })
}
