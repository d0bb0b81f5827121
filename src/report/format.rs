//! Terminal summary formatting.
//!
//! Speeds and ETAs print with 2 decimals. Queries that failed with a typed
//! error render as an explanatory line instead of a number; only the summary
//! layout lives here, never the math.

use crate::app::pipeline::RunOutput;
use crate::domain::{RecordGrammar, RunConfig};
use crate::error::AnalysisError;

/// Format the full run summary (log coverage + range + speed/ETA block).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    let first = run.series.first();
    let last = run.series.last();
    let fmt = RecordGrammar::DATE_FORMAT;

    out.push_str("=== pace - reading progress ===\n");
    out.push_str(&format!(
        "Log: {} | lines read={} matched={}\n",
        config.log_path.display(),
        run.lines_read,
        run.lines_matched,
    ));
    out.push_str(&format!(
        "Range: {} → {} | pages {} → {}\n",
        first.date.format(fmt),
        last.date.format(fmt),
        first.quantity,
        last.quantity,
    ));
    out.push_str(&format_target_line(run));

    out.push_str("\nSpeed:\n");
    out.push_str(&format!("- average  : {}\n", fmt_speed(&run.average_speed)));
    out.push_str(&format!(
        "- last {:>2}d : {}\n",
        run.window_days,
        fmt_speed(&run.window_speed)
    ));

    out.push_str("\nETA:\n");
    out.push_str(&format!("- average  : {}\n", fmt_eta(&run.average_eta)));
    out.push_str(&format!(
        "- last {:>2}d : {}\n",
        run.window_days,
        fmt_eta(&run.window_eta)
    ));

    out
}

fn format_target_line(run: &RunOutput) -> String {
    match run.series.target() {
        Some(target) => {
            let left = target as i64 - run.series.last().quantity as i64;
            if left > 0 {
                format!("Target: {target} ({left} pages left)\n")
            } else {
                format!("Target: {target} (reached)\n")
            }
        }
        None => "Target: none (ETA disabled)\n".to_string(),
    }
}

fn fmt_speed(speed: &Result<f64, AnalysisError>) -> String {
    match speed {
        Ok(v) => format!("{v:.2} pages/day"),
        Err(err) => format!("n/a ({err})"),
    }
}

fn fmt_eta(eta: &Result<f64, AnalysisError>) -> String {
    match eta {
        Ok(v) => format!("{v:.2} days"),
        Err(err) => format!("n/a ({err})"),
    }
}
