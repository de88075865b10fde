//! Transcoder invocation builders
//!
//! Each kept segment becomes one extraction call (stream copy or precise
//! re-encode) and all parts are joined by a final stream-copy concatenation.

use std::ffi::OsString;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{Interval, TrimStrategy};

pub mod concat;
pub mod copy;
pub mod progress;
pub mod reencode;

pub use concat::ConcatJoiner;
pub use copy::StreamCopyClipper;
pub use progress::{ChannelProgressSink, ProgressEvent, ProgressMonitor};
pub use reencode::ReencodeClipper;

/// Fixed codec configuration shared by every precisely trimmed part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    /// Video codec
    pub video_codec: String,
    /// Encoding preset
    pub preset: String,
    /// CRF quality setting
    pub crf: u8,
    /// Audio codec
    pub audio_codec: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "veryfast".to_string(),
            crf: 23,
            audio_codec: "aac".to_string(),
        }
    }
}

impl EncodeSettings {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.crf > 51 {
            return Err(DomainError::Config(
                "CRF value cannot exceed 51".to_string(),
            ));
        }
        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(DomainError::Config("Codec names cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Builds the argument vector that extracts one kept segment into a part file
pub trait SegmentExtractor: Send + Sync {
    fn extract_args(&self, source: &Path, segment: &Interval, part: &Path) -> Vec<OsString>;
}

/// Select the extractor for a trim strategy
pub fn extractor_for(strategy: TrimStrategy, settings: &EncodeSettings) -> Box<dyn SegmentExtractor> {
    match strategy {
        TrimStrategy::FastCopy => Box::new(StreamCopyClipper::new()),
        TrimStrategy::PreciseReencode => Box::new(ReencodeClipper::new(settings.clone())),
    }
}

/// Name of the i-th part file, using the output container's extension
pub fn part_file_name(index: usize, output: &Path) -> String {
    let extension = output
        .extension()
        .map(|ext| ext.to_string_lossy().to_string())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "mp4".to_string());
    format!("part_{:03}.{}", index, extension)
}

pub(crate) fn os_args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_part_file_name_follows_output_extension() {
        assert_eq!(part_file_name(0, &PathBuf::from("out.mkv")), "part_000.mkv");
        assert_eq!(part_file_name(12, &PathBuf::from("out")), "part_012.mp4");
    }

    #[test]
    fn test_encode_settings_validation() {
        assert!(EncodeSettings::default().validate().is_ok());
        let settings = EncodeSettings {
            crf: 52,
            ..EncodeSettings::default()
        };
        assert!(matches!(settings.validate(), Err(DomainError::Config(_))));
    }
}
