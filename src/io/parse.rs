//! Flat-log parsing and normalization.
//!
//! This module is responsible for turning a loosely-structured progress log
//! into a clean set of dated records plus an optional target total.
//!
//! Design goals:
//! - **Tolerant line matching**: anything that isn't a record or `total` line
//!   (comments, headers, blanks) is skipped, but skipped lines are counted so
//!   the report can show coverage
//! - **Deterministic conflict resolution**: a date listed twice keeps the
//!   later line; a `total` listed twice keeps the first
//! - **Separation of concerns**: no speed/ETA logic here

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Record, RecordGrammar};
use crate::error::{AppError, ParseError};

/// Parse output: normalized records + optional target + line accounting.
#[derive(Debug, Clone)]
pub struct ParsedLog {
    /// Records sorted ascending by date, one per date.
    pub records: Vec<Record>,
    /// Goal quantity from the first `total` line, if any.
    pub target: Option<u32>,
    pub lines_read: usize,
    /// Lines that matched the record pattern (not counting `total`).
    pub lines_matched: usize,
}

/// Read and parse a progress log file.
pub fn load_log(path: &Path, grammar: &RecordGrammar) -> Result<ParsedLog, AppError> {
    // The file is fully read and closed here, before any computation.
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open log '{}': {e}", path.display())))?;
    parse_log(&text, grammar).map_err(AppError::from)
}

/// Parse raw log text against a grammar.
pub fn parse_log(text: &str, grammar: &RecordGrammar) -> Result<ParsedLog, ParseError> {
    // BTreeMap gives date-sorted output and later-line-wins overwrites in one
    // structure; file order beyond that has no meaning.
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    let mut target: Option<u32> = None;
    let mut lines_read = 0usize;
    let mut lines_matched = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        lines_read += 1;
        let line = raw.trim();

        if let Some((date_token, qty_token)) = grammar.match_record(line) {
            lines_matched += 1;
            let date = parse_date(date_token, grammar.date_format(), line_no)?;
            let quantity = parse_quantity(qty_token, line_no)?;
            by_date.insert(date, quantity);
            continue;
        }

        if let Some(qty_token) = grammar.match_total(line) {
            // Only the first `total` line counts.
            if target.is_none() {
                target = Some(parse_quantity(qty_token, line_no)?);
            }
        }
        // Everything else is silently skipped.
    }

    let records = by_date
        .into_iter()
        .map(|(date, quantity)| Record { date, quantity })
        .collect();

    Ok(ParsedLog {
        records,
        target,
        lines_read,
        lines_matched,
    })
}

fn parse_date(token: &str, format: &str, line_no: usize) -> Result<NaiveDate, ParseError> {
    // The pattern already fixed the token shape, so this only rejects
    // out-of-range components (month 13, day 32, ...).
    NaiveDate::parse_from_str(token, format).map_err(|_| ParseError::BadDate {
        line: line_no,
        token: token.to_string(),
    })
}

fn parse_quantity(token: &str, line_no: usize) -> Result<u32, ParseError> {
    token.parse::<u32>().map_err(|_| ParseError::BadQuantity {
        line: line_no,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> RecordGrammar {
        RecordGrammar::new("-").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y.%m.%d").unwrap()
    }

    #[test]
    fn parses_records_and_total() {
        let text = "2020.04.18 - 431\n2020.04.19 - 455\ntotal - 800\n";
        let parsed = parse_log(text, &grammar()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0], Record { date: date("2020.04.18"), quantity: 431 });
        assert_eq!(parsed.records[1], Record { date: date("2020.04.19"), quantity: 455 });
        assert_eq!(parsed.target, Some(800));
        assert_eq!(parsed.lines_read, 3);
        assert_eq!(parsed.lines_matched, 2);
    }

    #[test]
    fn skips_unmatched_lines_silently() {
        let text = "# reading log\n\n2020.04.18 - 431\nnot a record\n2020.04.19 - 455\n";
        let parsed = parse_log(text, &grammar()).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.lines_read, 5);
        assert_eq!(parsed.lines_matched, 2);
    }

    #[test]
    fn records_come_out_sorted_regardless_of_file_order() {
        let text = "2020.04.20 - 470\n2020.04.18 - 431\n2020.04.19 - 455\n";
        let parsed = parse_log(text, &grammar()).unwrap();

        let dates: Vec<NaiveDate> = parsed.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2020.04.18"), date("2020.04.19"), date("2020.04.20")]);
    }

    #[test]
    fn duplicate_date_keeps_the_later_line() {
        let text = "2020.04.18 - 431\n2020.04.18 - 440\n";
        let parsed = parse_log(text, &grammar()).unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].quantity, 440);
    }

    #[test]
    fn first_total_line_wins() {
        let text = "total - 800\n2020.04.18 - 431\ntotal - 900\n";
        let parsed = parse_log(text, &grammar()).unwrap();
        assert_eq!(parsed.target, Some(800));
    }

    #[test]
    fn missing_total_leaves_target_unset() {
        let parsed = parse_log("2020.04.18 - 431\n", &grammar()).unwrap();
        assert_eq!(parsed.target, None);
    }

    #[test]
    fn total_only_log_yields_no_records() {
        let parsed = parse_log("total - 800\n", &grammar()).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.target, Some(800));
    }

    #[test]
    fn custom_separator() {
        let g = RecordGrammar::new("=>").unwrap();
        let parsed = parse_log("2020.04.18 => 431\ntotal => 800\n", &g).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.target, Some(800));
    }

    #[test]
    fn out_of_range_date_is_a_parse_error() {
        let err = parse_log("2020.13.18 - 431\n", &grammar()).unwrap_err();
        assert_eq!(
            err,
            ParseError::BadDate { line: 1, token: "2020.13.18".to_string() }
        );
    }

    #[test]
    fn overflowing_quantity_is_a_parse_error() {
        let err = parse_log("2020.04.18 - 99999999999\n", &grammar()).unwrap_err();
        assert!(matches!(err, ParseError::BadQuantity { line: 1, .. }));
    }
}
