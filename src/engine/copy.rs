//! Stream copy implementation

use std::ffi::OsString;
use std::path::Path;

use crate::domain::model::Interval;
use crate::engine::{os_args, SegmentExtractor};

/// Stream copy clipper for lossless, fast extraction.
///
/// The seek happens before the input is opened, so the transcoder starts at
/// the nearest preceding keyframe. Cut accuracy is therefore bounded by the
/// source's keyframe interval.
#[derive(Debug, Default)]
pub struct StreamCopyClipper;

impl StreamCopyClipper {
    /// Create a new stream copy clipper
    pub fn new() -> Self {
        Self
    }
}

impl SegmentExtractor for StreamCopyClipper {
    fn extract_args(&self, source: &Path, segment: &Interval, part: &Path) -> Vec<OsString> {
        let mut out = os_args([
            "-hide_banner".to_string(),
            "-y".to_string(),
            "-ss".to_string(),
            segment.start().to_arg(),
            "-i".to_string(),
        ]);
        out.push(source.as_os_str().to_os_string());
        out.extend(os_args([
            "-t".to_string(),
            segment.length().to_arg(),
            "-c".to_string(),
            "copy".to_string(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
        ]));
        out.push(part.as_os_str().to_os_string());
        out
    }
}
