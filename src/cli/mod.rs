//! CLI module for cutx
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{ExportArgs, PlanArgs, ProbeArgs};

/// cutx - remove time ranges from a video
///
/// Cuts are given as START-END ranges; everything outside them is extracted
/// and joined into a new file by an external transcoder.
#[derive(Parser, Debug)]
#[command(name = "cutx")]
#[command(about = "cutx - Remove time ranges from a video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Config file (default: ./cutx.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut ranges out of a video and write the rest to a new file
    Export(ExportArgs),
    /// Show the merged cuts and the segments that would be kept
    Plan(PlanArgs),
    /// Print the total duration of a media file
    Probe(ProbeArgs),
}
