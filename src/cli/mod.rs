//! Command-line parsing for the progress tracker.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! parsing/analysis code; flags resolve into a `RunConfig` in `crate::app`.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pace", version, about = "Flat-file reading progress: speed, ETA, chart")]
pub struct Cli {
    /// Progress log file (default: $PACE_FILE, then ./progress.txt).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Date/quantity separator token used in the log.
    #[arg(long, default_value = "-")]
    pub sep: String,

    /// Days in the "recent" window reported next to the all-time figures.
    #[arg(long, default_value_t = 7)]
    pub window: u32,

    /// Print a fixed-grid chart to stdout instead of the interactive chart.
    #[arg(long)]
    pub ascii: bool,

    /// Skip chart rendering entirely.
    #[arg(long)]
    pub no_plot: bool,

    /// ASCII chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII chart height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
