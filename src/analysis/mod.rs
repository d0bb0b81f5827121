//! Speed and ETA queries over a progress series.
//!
//! All functions are pure: the series carries its own "today", so results are
//! reproducible and the degenerate cases (zero-day interval, no target, no
//! progress, regression) surface as typed errors instead of `inf`/`NaN`
//! propagating into the report.

use chrono::{Duration, NaiveDate};

use crate::domain::Window;
use crate::error::AnalysisError;
use crate::series::ProgressSeries;

/// Average quantity delta per elapsed day between two dates.
///
/// Both endpoints are resolved with step-function lookup, so dates outside
/// the recorded range clamp to the baseline/final quantity.
pub fn speed_between(
    series: &ProgressSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, AnalysisError> {
    if start > end {
        return Err(AnalysisError::InvertedInterval { start, end });
    }
    if start == end {
        return Err(AnalysisError::ZeroInterval { date: start });
    }

    let delta_quantity = series.quantity_on(end) as i64 - series.quantity_on(start) as i64;
    let elapsed_days = (end - start).num_days();
    Ok(delta_quantity as f64 / elapsed_days as f64)
}

/// Speed over a window.
///
/// `AllTime` runs from the first to the last recorded date. `LastDays(n)`
/// runs from `today - n` days to the last recorded date; a window reaching
/// past the first record clamps to the baseline, deliberately yielding the
/// speed over the available span rather than an error.
pub fn speed(series: &ProgressSeries, window: Window) -> Result<f64, AnalysisError> {
    match window {
        Window::AllTime => speed_between(series, series.first().date, series.last().date),
        Window::LastDays(0) => Err(AnalysisError::ZeroInterval { date: series.today() }),
        Window::LastDays(n) => {
            let start = series.today() - Duration::days(n as i64);
            speed_between(series, start, series.last().date)
        }
    }
}

/// Estimated days remaining until the target quantity is reached.
///
/// A target at or below the last recorded quantity is done: 0 days. Zero or
/// negative speed cannot produce an ETA and is reported as such.
pub fn eta_days(series: &ProgressSeries, window: Window) -> Result<f64, AnalysisError> {
    let target = series.target().ok_or(AnalysisError::MissingTarget)?;

    let quantity_left = target as i64 - series.last().quantity as i64;
    if quantity_left <= 0 {
        return Ok(0.0);
    }

    let speed = speed(series, window)?;
    if speed == 0.0 {
        return Err(AnalysisError::Stalled);
    }
    if speed < 0.0 {
        return Err(AnalysisError::Regressing { speed });
    }

    Ok(quantity_left as f64 / speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y.%m.%d").unwrap()
    }

    fn series(records: &[(&str, u32)], target: Option<u32>, today: &str) -> ProgressSeries {
        let records = records
            .iter()
            .map(|&(d, quantity)| Record { date: date(d), quantity })
            .collect();
        ProgressSeries::from_records(records, target, date(today)).unwrap()
    }

    #[test]
    fn all_time_speed_over_ten_days() {
        let s = series(&[("2020.01.01", 100), ("2020.01.11", 200)], None, "2020.01.11");
        assert_eq!(speed(&s, Window::AllTime).unwrap(), 10.0);
    }

    #[test]
    fn equal_endpoints_fail_with_zero_interval() {
        let s = series(&[("2020.01.01", 100), ("2020.01.11", 200)], None, "2020.01.11");
        let err = speed_between(&s, date("2020.01.05"), date("2020.01.05")).unwrap_err();
        assert_eq!(err, AnalysisError::ZeroInterval { date: date("2020.01.05") });
    }

    #[test]
    fn single_record_series_has_no_all_time_speed() {
        let s = series(&[("2020.01.11", 200)], None, "2020.01.11");
        assert!(matches!(
            speed(&s, Window::AllTime),
            Err(AnalysisError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn inverted_endpoints_are_rejected() {
        let s = series(&[("2020.01.01", 100), ("2020.01.11", 200)], None, "2020.01.11");
        let err = speed_between(&s, date("2020.01.11"), date("2020.01.01")).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvertedInterval { start: date("2020.01.11"), end: date("2020.01.01") }
        );
    }

    #[test]
    fn window_reaching_before_the_first_record_clamps_to_baseline() {
        // Seven-day window, but the log only covers two days of it. The start
        // resolves to the baseline quantity, so the delta is spread over the
        // whole window.
        let s = series(&[("2020.04.18", 100), ("2020.04.20", 200)], None, "2020.04.20");
        let got = speed(&s, Window::LastDays(7)).unwrap();
        assert!((got - 100.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let s = series(&[("2020.04.18", 100), ("2020.04.20", 200)], None, "2020.04.20");
        assert!(matches!(
            speed(&s, Window::LastDays(0)),
            Err(AnalysisError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn negative_speed_is_tolerated_by_the_speed_query() {
        // Non-monotonic logs are allowed; the speed is simply negative.
        let s = series(&[("2020.01.01", 200), ("2020.01.11", 100)], None, "2020.01.11");
        assert_eq!(speed(&s, Window::AllTime).unwrap(), -10.0);
    }

    #[test]
    fn eta_at_average_speed() {
        // 360 pages over 30 days = 12.0/day; 345 left -> 28.75 days.
        let s = series(
            &[("2020.01.01", 95), ("2020.01.31", 455)],
            Some(800),
            "2020.01.31",
        );
        assert_eq!(eta_days(&s, Window::AllTime).unwrap(), 28.75);
    }

    #[test]
    fn eta_without_target_fails() {
        let s = series(&[("2020.01.01", 100), ("2020.01.11", 200)], None, "2020.01.11");
        assert_eq!(eta_days(&s, Window::AllTime).unwrap_err(), AnalysisError::MissingTarget);
    }

    #[test]
    fn eta_when_target_already_reached_is_zero() {
        let s = series(
            &[("2020.01.01", 100), ("2020.01.11", 850)],
            Some(800),
            "2020.01.11",
        );
        assert_eq!(eta_days(&s, Window::AllTime).unwrap(), 0.0);
    }

    #[test]
    fn eta_with_no_progress_is_stalled() {
        let s = series(
            &[("2020.01.01", 455), ("2020.01.11", 455)],
            Some(800),
            "2020.01.11",
        );
        assert_eq!(eta_days(&s, Window::AllTime).unwrap_err(), AnalysisError::Stalled);
    }

    #[test]
    fn eta_while_regressing_is_an_error_not_a_negative_count() {
        let s = series(
            &[("2020.01.01", 500), ("2020.01.11", 455)],
            Some(800),
            "2020.01.11",
        );
        assert!(matches!(
            eta_days(&s, Window::AllTime),
            Err(AnalysisError::Regressing { .. })
        ));
    }

    #[test]
    fn idle_days_since_the_last_entry_count_against_the_speed() {
        // Log ends 2020.01.11 at 200; today is 2020.01.21. Augmentation
        // carries 200 forward, so the all-time speed halves.
        let s = series(&[("2020.01.01", 100), ("2020.01.11", 200)], None, "2020.01.21");
        assert_eq!(speed(&s, Window::AllTime).unwrap(), 5.0);
    }
}
