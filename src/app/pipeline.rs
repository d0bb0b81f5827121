//! Shared analysis pipeline used by both the plain-CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load log -> build series -> speed/ETA queries
//!
//! The terminal report and the chart then focus on presentation and always
//! show the same computed numbers.

use chrono::NaiveDate;

use crate::analysis;
use crate::domain::{RecordGrammar, RunConfig, Window};
use crate::error::{AnalysisError, AppError};
use crate::io::{self, ParsedLog};
use crate::series::ProgressSeries;

/// All computed outputs of a single run.
///
/// The speed/ETA fields keep their typed errors so the report can render the
/// degenerate cases (no target, stalled, regressing) as explanatory lines
/// instead of aborting the run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: ProgressSeries,
    pub lines_read: usize,
    pub lines_matched: usize,
    pub window_days: u32,
    pub average_speed: Result<f64, AnalysisError>,
    pub window_speed: Result<f64, AnalysisError>,
    pub average_eta: Result<f64, AnalysisError>,
    pub window_eta: Result<f64, AnalysisError>,
}

/// Execute the full pipeline for a configured run.
pub fn run_analysis(config: &RunConfig, today: NaiveDate) -> Result<RunOutput, AppError> {
    let grammar = RecordGrammar::new(&config.separator)?;
    let parsed = io::load_log(&config.log_path, &grammar)?;

    analyze(parsed, config.window_days, today).map_err(|err| match err {
        AnalysisError::EmptySeries => AppError::new(
            3,
            format!("No records matched in '{}'.", config.log_path.display()),
        ),
        other => AppError::from(other),
    })
}

/// Run the analysis over already-parsed log output.
///
/// Only an empty series is an error here; every per-query failure is carried
/// inside the output.
pub fn analyze(
    parsed: ParsedLog,
    window_days: u32,
    today: NaiveDate,
) -> Result<RunOutput, AnalysisError> {
    let lines_read = parsed.lines_read;
    let lines_matched = parsed.lines_matched;

    let series = ProgressSeries::from_log(parsed, today)?;

    let window = Window::LastDays(window_days);
    let average_speed = analysis::speed(&series, Window::AllTime);
    let window_speed = analysis::speed(&series, window);
    let average_eta = analysis::eta_days(&series, Window::AllTime);
    let window_eta = analysis::eta_days(&series, window);

    Ok(RunOutput {
        series,
        lines_read,
        lines_matched,
        window_days,
        average_speed,
        window_speed,
        average_eta,
        window_eta,
    })
}
