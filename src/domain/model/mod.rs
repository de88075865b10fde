// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::rules;

/// Time specification with precision - represents media time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// The start of the media
    pub fn zero() -> Self {
        Self { seconds: 0.0 }
    }

    /// Create a new TimeSpec from hours, minutes, seconds, milliseconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let total_seconds = hours as f64 * 3600.0
            + minutes as f64 * 60.0
            + seconds as f64
            + milliseconds as f64 / 1000.0;
        Self {
            seconds: total_seconds,
        }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    pub fn max(self, other: Self) -> Self {
        if other.seconds > self.seconds {
            other
        } else {
            self
        }
    }

    pub fn min(self, other: Self) -> Self {
        if other.seconds < self.seconds {
            other
        } else {
            self
        }
    }

    /// Parse a user-entered or transcoder-reported timestamp.
    ///
    /// Accepts decimal seconds (`90.5`), `HH:MM` and `HH:MM:SS(.frac)`.
    /// A two-part clock value is hours and minutes, so `01:30` is 5400 s.
    /// The decimal point is always `.`, whatever the host locale.
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidFormat {
                text: time_str.to_string(),
            });
        }

        if !trimmed.contains(':') {
            return Ok(Self::from_seconds(parse_seconds(trimmed, trimmed)?));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(DomainError::InvalidFormat {
                text: trimmed.to_string(),
            });
        }

        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m, s] => (
                parse_whole(h, trimmed)?,
                parse_whole(m, trimmed)?,
                parse_seconds(s, trimmed)?,
            ),
            [h, m] => (parse_whole(h, trimmed)?, parse_whole(m, trimmed)?, 0.0),
            _ => {
                return Err(DomainError::InvalidFormat {
                    text: trimmed.to_string(),
                })
            }
        };

        if minutes >= 60 || seconds >= 60.0 {
            return Err(DomainError::InvalidFormat {
                text: trimmed.to_string(),
            });
        }

        Ok(Self::from_seconds(
            hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
        ))
    }

    /// Decimal seconds for a transcoder command line
    pub fn to_arg(&self) -> String {
        // f64 Display never uses an exponent or a locale separator
        self.seconds.to_string()
    }

    /// Format as HH:MM:SS.mmm
    pub fn format_hms(&self) -> String {
        let total_millis = (self.seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        let milliseconds = total_millis % 1000;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

impl FromStr for TimeSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::ops::Sub for TimeSpec {
    type Output = TimeSpec;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeSpec::from_seconds(self.seconds - rhs.seconds)
    }
}

fn parse_seconds(component: &str, text: &str) -> Result<f64, DomainError> {
    let value = component
        .parse::<f64>()
        .map_err(|e| DomainError::InvalidNumber {
            text: text.to_string(),
            reason: e.to_string(),
        })?;

    if !value.is_finite() {
        return Err(DomainError::InvalidNumber {
            text: text.to_string(),
            reason: "value is not finite".to_string(),
        });
    }
    if value < 0.0 {
        return Err(DomainError::InvalidNumber {
            text: text.to_string(),
            reason: "time cannot be negative".to_string(),
        });
    }

    Ok(value)
}

fn parse_whole(component: &str, text: &str) -> Result<u64, DomainError> {
    component
        .parse::<u64>()
        .map_err(|e| DomainError::InvalidNumber {
            text: text.to_string(),
            reason: e.to_string(),
        })
}

/// A span of media time with `end > start`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    start: TimeSpec,
    end: TimeSpec,
}

impl Interval {
    /// Create a validated interval
    pub fn new(start: TimeSpec, end: TimeSpec) -> Result<Self, DomainError> {
        if end.seconds <= start.seconds || !start.seconds.is_finite() || !end.seconds.is_finite()
        {
            return Err(DomainError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Convenience constructor from plain seconds
    pub fn from_seconds(start: f64, end: f64) -> Result<Self, DomainError> {
        Self::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end))
    }

    /// Callers guarantee `end > start`
    pub(crate) fn new_unchecked(start: TimeSpec, end: TimeSpec) -> Self {
        debug_assert!(end.seconds > start.seconds);
        Self { start, end }
    }

    pub fn start(&self) -> TimeSpec {
        self.start
    }

    pub fn end(&self) -> TimeSpec {
        self.end
    }

    /// Length of the interval
    pub fn length(&self) -> TimeSpec {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// The user's set of ranges to remove, kept sorted and merged after every edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutList {
    cuts: Vec<Interval>,
}

impl CutList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a normalized list from arbitrary intervals
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let cuts: Vec<Interval> = intervals.into_iter().collect();
        Self {
            cuts: rules::normalize(&cuts),
        }
    }

    pub fn add(&mut self, interval: Interval) {
        self.cuts.push(interval);
        self.renormalize();
    }

    /// Validate and add a range; nothing is inserted on error
    pub fn add_range(&mut self, start: TimeSpec, end: TimeSpec) -> Result<(), DomainError> {
        let interval = Interval::new(start, end)?;
        self.add(interval);
        Ok(())
    }

    /// Parse both timestamps, then add the range
    pub fn add_parsed(&mut self, start: &str, end: &str) -> Result<(), DomainError> {
        let start = TimeSpec::parse(start)?;
        let end = TimeSpec::parse(end)?;
        self.add_range(start, end)
    }

    /// Remove by position in the normalized order
    pub fn remove(&mut self, index: usize) -> Option<Interval> {
        if index >= self.cuts.len() {
            return None;
        }
        let removed = self.cuts.remove(index);
        self.renormalize();
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.cuts.clear();
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.cuts
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Snapshot of the ranges to keep for a media of the given length
    pub fn keep_segments(&self, total: TimeSpec) -> Vec<Interval> {
        rules::compute_keep(total, &self.cuts)
    }

    fn renormalize(&mut self) {
        self.cuts = rules::normalize(&self.cuts);
    }
}

/// How each kept segment is extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimStrategy {
    /// Stream copy; cut points snap to keyframes
    #[default]
    #[serde(alias = "copy", alias = "fast")]
    FastCopy,
    /// Decode-accurate seek with a fixed re-encode
    #[serde(alias = "precise", alias = "reencode")]
    PreciseReencode,
}

impl TrimStrategy {
    /// Parse strategy from string
    pub fn parse(mode_str: &str) -> Result<Self, DomainError> {
        match mode_str.trim().to_lowercase().as_str() {
            "copy" | "fast" | "fast-copy" => Ok(TrimStrategy::FastCopy),
            "precise" | "reencode" | "precise-reencode" => Ok(TrimStrategy::PreciseReencode),
            _ => Err(DomainError::Config(format!(
                "Invalid trim mode: {}. Valid modes: copy, precise",
                mode_str
            ))),
        }
    }

    pub fn from_precise(precise: bool) -> Self {
        if precise {
            TrimStrategy::PreciseReencode
        } else {
            TrimStrategy::FastCopy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrimStrategy::FastCopy => "copy",
            TrimStrategy::PreciseReencode => "precise",
        }
    }
}

impl fmt::Display for TrimStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrimStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Lifecycle of one export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportPhase {
    Idle,
    ExtractingSegment { index: usize, total: usize },
    Concatenating,
    Done,
    Canceled,
    Failed,
}

impl ExportPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportPhase::Done | ExportPhase::Canceled | ExportPhase::Failed
        )
    }
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportPhase::Idle => write!(f, "idle"),
            ExportPhase::ExtractingSegment { index, total } => {
                write!(f, "extracting segment {}/{}", index + 1, total)
            }
            ExportPhase::Concatenating => write!(f, "concatenating"),
            ExportPhase::Done => write!(f, "done"),
            ExportPhase::Canceled => write!(f, "canceled"),
            ExportPhase::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests;
