//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves the run configuration
//! - runs the load/analyze pipeline
//! - prints the summary report
//! - renders the requested chart

use std::path::PathBuf;

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{ChartMode, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the default log file.
const ENV_LOG_FILE: &str = "PACE_FILE";
/// Fallback log path when neither `--file` nor the environment provides one.
const DEFAULT_LOG_FILE: &str = "progress.txt";

/// Entry point for the `pace` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = run_config_from_args(&cli);

    let today = chrono::Local::now().date_naive();
    let run = pipeline::run_analysis(&config, today)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    match config.chart {
        ChartMode::Interactive => crate::tui::run(&run)?,
        ChartMode::Ascii => {
            let plot =
                crate::plot::render_ascii_chart(&run.series, config.chart_width, config.chart_height);
            println!("{plot}");
        }
        ChartMode::Off => {}
    }

    Ok(())
}

pub fn run_config_from_args(args: &Cli) -> RunConfig {
    let chart = if args.no_plot {
        ChartMode::Off
    } else if args.ascii {
        ChartMode::Ascii
    } else {
        ChartMode::Interactive
    };

    RunConfig {
        log_path: args.file.clone().unwrap_or_else(default_log_path),
        separator: args.sep.clone(),
        window_days: args.window,
        chart,
        chart_width: args.width,
        chart_height: args.height,
    }
}

/// Default log path: `$PACE_FILE` (with `.env` support), then `progress.txt`.
fn default_log_path() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var(ENV_LOG_FILE)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE))
}
