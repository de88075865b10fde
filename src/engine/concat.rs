//! Concatenation of extracted parts via the transcoder's list demuxer

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::engine::os_args;

/// Name of the list file written into the workspace
pub const MANIFEST_FILE_NAME: &str = "concat.txt";

/// Joins part files by stream copy, never re-encoding them
#[derive(Debug, Default)]
pub struct ConcatJoiner;

impl ConcatJoiner {
    pub fn new() -> Self {
        Self
    }

    /// Quote a path for the list format: `'` becomes `'\''`
    pub fn escape_path(path: &Path) -> String {
        path.to_string_lossy().replace('\'', "'\\''")
    }

    /// Manifest text listing the parts in order
    pub fn manifest(parts: &[PathBuf]) -> String {
        parts
            .iter()
            .map(|part| format!("file '{}'\n", Self::escape_path(part)))
            .collect()
    }

    /// Write the manifest into `workspace` and return its path
    pub async fn write_manifest(
        &self,
        workspace: &Path,
        parts: &[PathBuf],
    ) -> Result<PathBuf, DomainError> {
        let manifest_path = workspace.join(MANIFEST_FILE_NAME);
        tokio::fs::write(&manifest_path, Self::manifest(parts)).await?;
        debug!(
            "Wrote concat manifest with {} parts: {}",
            parts.len(),
            manifest_path.display()
        );
        Ok(manifest_path)
    }

    pub fn concat_args(&self, manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut out = os_args(["-hide_banner", "-y", "-f", "concat", "-safe", "0", "-i"]);
        out.push(manifest.as_os_str().to_os_string());
        out.extend(os_args(["-c", "copy"]));
        out.push(output.as_os_str().to_os_string());
        out
    }
}
