//! The validated progress time series.
//!
//! `ProgressSeries` is the one structure every analyzer and chart consumes:
//! date-sorted, one record per date, never empty. Construction also performs
//! the single "today" augmentation: when the last log entry predates today,
//! a synthetic record carrying the last known quantity forward is appended so
//! idle days count against the speed. The source file is never touched.

use chrono::NaiveDate;

use crate::domain::Record;
use crate::error::AnalysisError;
use crate::io::ParsedLog;

#[derive(Debug, Clone)]
pub struct ProgressSeries {
    /// Sorted ascending by date, unique dates. Invariant: non-empty.
    records: Vec<Record>,
    target: Option<u32>,
    today: NaiveDate,
}

impl ProgressSeries {
    /// Build a series from parsed log output.
    ///
    /// Fails with `EmptySeries` when no record lines matched, so downstream
    /// queries never index into an empty series.
    pub fn from_log(parsed: ParsedLog, today: NaiveDate) -> Result<Self, AnalysisError> {
        Self::from_records(parsed.records, parsed.target, today)
    }

    /// Build a series from pre-sorted records (the parser's output contract).
    pub fn from_records(
        mut records: Vec<Record>,
        target: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        // Augment exactly once: carry the last quantity forward to today.
        // A log already ending on (or after) today is left untouched, which
        // makes a second run on the same day a no-op.
        let last = records[records.len() - 1];
        if last.date < today {
            records.push(Record {
                date: today,
                quantity: last.quantity,
            });
        }

        Ok(Self {
            records,
            target,
            today,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn first(&self) -> Record {
        self.records[0]
    }

    pub fn last(&self) -> Record {
        self.records[self.records.len() - 1]
    }

    /// Quantity in effect at `date`, with step-function semantics: the value
    /// of the latest record dated at or before `date`.
    ///
    /// Out-of-range dates clamp deliberately (flat extrapolation): before the
    /// first record the baseline quantity applies (not zero), after the last
    /// record the final quantity applies.
    pub fn quantity_on(&self, date: NaiveDate) -> u32 {
        let idx = self.records.partition_point(|r| r.date <= date);
        if idx == 0 {
            self.records[0].quantity
        } else {
            self.records[idx - 1].quantity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y.%m.%d").unwrap()
    }

    fn record(s: &str, quantity: u32) -> Record {
        Record { date: date(s), quantity }
    }

    #[test]
    fn empty_records_are_rejected_at_construction() {
        let err = ProgressSeries::from_records(vec![], Some(800), date("2020.04.20")).unwrap_err();
        assert_eq!(err, AnalysisError::EmptySeries);
    }

    #[test]
    fn today_is_appended_when_log_ends_earlier() {
        let series = ProgressSeries::from_records(
            vec![record("2020.04.18", 431)],
            None,
            date("2020.04.20"),
        )
        .unwrap();

        assert_eq!(series.records().len(), 2);
        assert_eq!(series.last(), record("2020.04.20", 431));
    }

    #[test]
    fn augmentation_is_a_noop_when_log_already_ends_today() {
        let series = ProgressSeries::from_records(
            vec![record("2020.04.18", 431), record("2020.04.20", 455)],
            None,
            date("2020.04.20"),
        )
        .unwrap();

        assert_eq!(series.records().len(), 2);
        assert_eq!(series.last(), record("2020.04.20", 455));
    }

    #[test]
    fn augmenting_twice_changes_nothing() {
        // Simulates two runs on the same day: building a series from the
        // already-augmented records must not add another today-entry.
        let first = ProgressSeries::from_records(
            vec![record("2020.04.18", 431)],
            None,
            date("2020.04.20"),
        )
        .unwrap();

        let second = ProgressSeries::from_records(
            first.records().to_vec(),
            None,
            date("2020.04.20"),
        )
        .unwrap();

        assert_eq!(first.records(), second.records());
    }

    #[test]
    fn step_lookup_before_exact_between_after() {
        let series = ProgressSeries::from_records(
            vec![
                record("2020.04.18", 431),
                record("2020.04.20", 455),
                record("2020.04.25", 470),
            ],
            None,
            date("2020.04.25"),
        )
        .unwrap();

        // Before the first record: baseline, not zero.
        assert_eq!(series.quantity_on(date("2020.04.01")), 431);
        // Exact hits.
        assert_eq!(series.quantity_on(date("2020.04.18")), 431);
        assert_eq!(series.quantity_on(date("2020.04.20")), 455);
        // Gap days hold the previous value.
        assert_eq!(series.quantity_on(date("2020.04.19")), 431);
        assert_eq!(series.quantity_on(date("2020.04.22")), 455);
        // After the last record: flat extrapolation forward.
        assert_eq!(series.quantity_on(date("2020.05.10")), 470);
    }

    #[test]
    fn future_dated_log_is_left_untouched() {
        let series = ProgressSeries::from_records(
            vec![record("2020.04.18", 431), record("2020.04.25", 470)],
            None,
            date("2020.04.20"),
        )
        .unwrap();

        assert_eq!(series.records().len(), 2);
        assert_eq!(series.last(), record("2020.04.25", 470));
    }
}
