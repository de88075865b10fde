//! Re-encoding implementation for frame-accurate cuts

use std::ffi::OsString;
use std::path::Path;

use crate::domain::model::Interval;
use crate::engine::{os_args, EncodeSettings, SegmentExtractor};

/// Re-encoding clipper.
///
/// Seeks after the input is opened so the cut lands on the decoded frame,
/// and encodes every part with the same settings so the parts can later be
/// joined without another encode.
#[derive(Debug, Clone)]
pub struct ReencodeClipper {
    settings: EncodeSettings,
}

impl ReencodeClipper {
    /// Create a new re-encoding clipper
    pub fn new(settings: EncodeSettings) -> Self {
        Self { settings }
    }
}

impl Default for ReencodeClipper {
    fn default() -> Self {
        Self::new(EncodeSettings::default())
    }
}

impl SegmentExtractor for ReencodeClipper {
    fn extract_args(&self, source: &Path, segment: &Interval, part: &Path) -> Vec<OsString> {
        let mut out = os_args(["-hide_banner", "-y", "-i"]);
        out.push(source.as_os_str().to_os_string());
        out.extend(os_args([
            "-ss".to_string(),
            segment.start().to_arg(),
            "-t".to_string(),
            segment.length().to_arg(),
            "-c:v".to_string(),
            self.settings.video_codec.clone(),
            "-preset".to_string(),
            self.settings.preset.clone(),
            "-crf".to_string(),
            self.settings.crf.to_string(),
            "-c:a".to_string(),
            self.settings.audio_codec.clone(),
        ]));
        out.push(part.as_os_str().to_os_string());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_reencode_seeks_after_input() {
        let segment = Interval::from_seconds(3.0, 6.0).unwrap();
        let args = ReencodeClipper::default().extract_args(
            &PathBuf::from("input.mp4"),
            &segment,
            &PathBuf::from("part_000.mp4"),
        );

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(input < ss);
        assert_eq!(args[ss + 1], "3");
        assert!(args.windows(2).any(|w| w[0] == "-t" && w[1] == "3"));
        assert!(args.windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx264"));
        assert!(args.windows(2).any(|w| w[0] == "-crf" && w[1] == "23"));
        assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "aac"));
    }

    #[test]
    fn test_reencode_uses_configured_codec() {
        let clipper = ReencodeClipper::new(EncodeSettings {
            video_codec: "libx265".to_string(),
            preset: "slow".to_string(),
            crf: 28,
            audio_codec: "libopus".to_string(),
        });
        let args = clipper.extract_args(
            &PathBuf::from("a.mkv"),
            &Interval::from_seconds(0.0, 1.0).unwrap(),
            &PathBuf::from("p.mkv"),
        );
        assert!(args.windows(2).any(|w| w[0] == "-preset" && w[1] == "slow"));
        assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "libopus"));
    }
}
