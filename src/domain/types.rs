//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during analysis
//! - handed to the chart renderers unchanged
//! - constructed directly in tests

use std::path::PathBuf;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ParseError;

/// One dated observation from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    /// Cumulative quantity recorded on `date` (pages, words, ...).
    pub quantity: u32,
}

/// The line grammar the parser is configured with.
///
/// Both patterns are compiled once at construction; a grammar that fails to
/// compile is rejected up front instead of surfacing as a per-line mismatch.
///
/// Record lines look like `2020.04.18 - 431` and the target line like
/// `total - 800`, with the separator token configurable and whitespace around
/// it tolerated. Anything else is not part of the grammar and is skipped by
/// the parser.
#[derive(Debug, Clone)]
pub struct RecordGrammar {
    date_format: String,
    separator: String,
    record_re: Regex,
    total_re: Regex,
}

impl RecordGrammar {
    /// Date format shared by the log and all date-labeled output.
    pub const DATE_FORMAT: &'static str = "%Y.%m.%d";

    /// Grammar with the default `YYYY.MM.DD` date format.
    pub fn new(separator: &str) -> Result<Self, ParseError> {
        Self::with_date_format(separator, Self::DATE_FORMAT)
    }

    pub fn with_date_format(separator: &str, date_format: &str) -> Result<Self, ParseError> {
        if separator.trim().is_empty() {
            return Err(ParseError::BadSeparator {
                separator: separator.to_string(),
            });
        }

        let sep = regex::escape(separator);
        let record_pattern = format!(r"^(?P<date>\d{{4}}\.\d{{2}}\.\d{{2}})\s*{sep}\s*(?P<qty>\d+)$");
        let total_pattern = format!(r"^total\s*{sep}\s*(?P<qty>\d+)$");

        let record_re = Regex::new(&record_pattern).map_err(|_| ParseError::BadSeparator {
            separator: separator.to_string(),
        })?;
        let total_re = Regex::new(&total_pattern).map_err(|_| ParseError::BadSeparator {
            separator: separator.to_string(),
        })?;

        Ok(Self {
            date_format: date_format.to_string(),
            separator: separator.to_string(),
            record_re,
            total_re,
        })
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Match a record line, returning the raw `(date, quantity)` tokens.
    ///
    /// The line must already be trimmed; the patterns are anchored.
    pub fn match_record<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.record_re.captures(line)?;
        // Both groups are mandatory in the pattern.
        let date = caps.name("date")?.as_str();
        let qty = caps.name("qty")?.as_str();
        Some((date, qty))
    }

    /// Match a `total` line, returning the raw quantity token.
    pub fn match_total<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.total_re.captures(line)?;
        Some(caps.name("qty")?.as_str())
    }
}

/// How the chart is rendered after the summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Fullscreen interactive chart (ratatui + plotters), dismissed with `q`.
    Interactive,
    /// Deterministic fixed-grid chart printed to stdout.
    Ascii,
    /// No chart.
    Off,
}

/// Interval selector for the speed/ETA queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// First recorded date through the last.
    AllTime,
    /// `today - n` days through today; clamps to the series baseline when the
    /// window reaches past the first record.
    LastDays(u32),
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags plus environment defaults; the core never
/// reads the environment itself.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub log_path: PathBuf,
    pub separator: String,
    /// Days in the "recent" window reported next to the all-time figures.
    pub window_days: u32,
    pub chart: ChartMode,
    pub chart_width: usize,
    pub chart_height: usize,
}
