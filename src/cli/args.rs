//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::errors::DomainError;
use crate::domain::model::{Interval, TimeSpec, TrimStrategy};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (default: <input stem>_edited.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Total duration of the input; probed with the transcoder when omitted
    #[arg(short, long, value_parser = parse_time)]
    pub duration: Option<TimeSpec>,

    /// Range to remove as START-END (seconds, HH:MM or HH:MM:SS), repeatable
    #[arg(short, long = "cut", value_name = "START-END", required = true, value_parser = parse_cut)]
    pub cuts: Vec<Interval>,

    /// Trim strategy: copy (fast, keyframe-aligned) or precise (re-encode)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<TrimStrategy>,

    /// Transcoder executable path or name
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Constant Rate Factor for precise mode (0-51)
    #[arg(long)]
    pub crf: Option<u8>,

    /// Directory for temporary part files
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,

    /// Print the export report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Total duration of the media
    #[arg(short, long, value_parser = parse_time)]
    pub duration: TimeSpec,

    /// Range to remove as START-END, repeatable
    #[arg(short, long = "cut", value_name = "START-END", value_parser = parse_cut)]
    pub cuts: Vec<Interval>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Transcoder executable path or name
    #[arg(long)]
    pub ffmpeg: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

fn parse_time(text: &str) -> Result<TimeSpec, DomainError> {
    TimeSpec::parse(text)
}

fn parse_mode(text: &str) -> Result<TrimStrategy, DomainError> {
    TrimStrategy::parse(text)
}

/// Parse `START-END` into a validated interval
pub fn parse_cut(text: &str) -> Result<Interval, DomainError> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| DomainError::InvalidFormat {
            text: text.to_string(),
        })?;
    Interval::new(TimeSpec::parse(start)?, TimeSpec::parse(end)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_parse_cut() {
        let cut = parse_cut("00:01:00-00:01:30.5").unwrap();
        assert_eq!(cut.start(), TimeSpec::from_seconds(60.0));
        assert_eq!(cut.end(), TimeSpec::from_seconds(90.5));

        assert!(matches!(parse_cut("10"), Err(DomainError::InvalidFormat { .. })));
        assert!(matches!(
            parse_cut("20-10"),
            Err(DomainError::InvalidRange { .. })
        ));
        assert!(matches!(
            parse_cut("a-10"),
            Err(DomainError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::try_parse_from([
            "cutx", "export", "-i", "in.mp4", "--cut", "10-20", "--cut", "30-40", "--mode",
            "precise",
        ])
        .unwrap();

        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.cuts.len(), 2);
        assert_eq!(args.mode, Some(TrimStrategy::PreciseReencode));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_export_requires_cut() {
        assert!(Cli::try_parse_from(["cutx", "export", "-i", "in.mp4"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cutx", "plan", "-d", "60", "--log-level", "debug", "--log-json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.log_json);
    }
}
