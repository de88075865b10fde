//! Executable resolution against the process search path

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::ports::LocatorPort;

/// Program looked up when no transcoder is configured
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Resolves a transcoder given as a path or as a bare program name
#[derive(Debug, Clone, Default)]
pub struct PathSearchLocator {
    search_path: Option<OsString>,
}

impl PathSearchLocator {
    /// Locator that scans the `PATH` environment variable
    pub fn new() -> Self {
        Self::default()
    }

    /// Locator that scans the given search path instead of `PATH`
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn candidate_names(program: &str) -> Vec<String> {
        let mut names = vec![program.to_string()];
        if cfg!(windows) && Path::new(program).extension().is_none() {
            names.push(format!("{}.exe", program));
        }
        names
    }
}

impl LocatorPort for PathSearchLocator {
    fn locate(&self, program: &str) -> Result<PathBuf, DomainError> {
        let program = match program.trim() {
            "" => DEFAULT_PROGRAM,
            trimmed => trimmed,
        };
        let not_found = || DomainError::ExecutableNotFound {
            program: program.to_string(),
        };

        let candidate = Path::new(program);
        if candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }

        // Only bare names are looked up on the search path
        if candidate.components().count() != 1 {
            return Err(not_found());
        }

        let search_path = self
            .search_path
            .clone()
            .or_else(|| env::var_os("PATH"))
            .ok_or_else(not_found)?;

        for dir in env::split_paths(&search_path) {
            for name in Self::candidate_names(program) {
                let full = dir.join(&name);
                if full.is_file() {
                    debug!("Resolved {} to {}", program, full.display());
                    return Ok(full);
                }
            }
        }

        Err(not_found())
    }
}
