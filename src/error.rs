//! Error types.
//!
//! Two layers:
//!
//! - typed core errors (`ParseError`, `AnalysisError`) that callers and tests
//!   can match on
//! - a process-level `AppError` carrying the exit code, produced at the app
//!   boundary via `From` conversions
//!
//! Exit codes: 2 = input/config, 3 = no usable records, 4 = analysis/render.

use chrono::NaiveDate;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Errors raised while turning raw log text into records.
///
/// The line pattern guarantees well-formed tokens, so `BadDate` and
/// `BadQuantity` are defensive (e.g. month 13, or a quantity overflowing u32).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The separator token cannot be compiled into a line pattern.
    BadSeparator { separator: String },
    /// A matched line's date token did not convert to a calendar date.
    BadDate { line: usize, token: String },
    /// A matched line's quantity token did not convert to an integer.
    BadQuantity { line: usize, token: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BadSeparator { separator } => {
                write!(f, "Invalid separator token '{separator}'.")
            }
            ParseError::BadDate { line, token } => {
                write!(f, "Line {line}: invalid date '{token}'.")
            }
            ParseError::BadQuantity { line, token } => {
                write!(f, "Line {line}: invalid quantity '{token}'.")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::new(2, err.to_string())
    }
}

/// Errors raised by the series constructor and the speed/ETA queries.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The log contained no dated records at all.
    EmptySeries,
    /// ETA was requested but the log has no `total` line.
    MissingTarget,
    /// Speed over an interval of zero elapsed days is undefined.
    ZeroInterval { date: NaiveDate },
    /// The interval's start date lies after its end date.
    InvertedInterval { start: NaiveDate, end: NaiveDate },
    /// No progress over the interval: the ETA would be infinite.
    Stalled,
    /// Negative speed while quantity remains: the ETA is undefined.
    Regressing { speed: f64 },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::EmptySeries => {
                write!(f, "No dated records found in the log.")
            }
            AnalysisError::MissingTarget => {
                write!(f, "No `total` line in the log; ETA is unavailable.")
            }
            AnalysisError::ZeroInterval { date } => {
                write!(f, "Zero elapsed days in speed interval (at {date}).")
            }
            AnalysisError::InvertedInterval { start, end } => {
                write!(f, "Speed interval start {start} lies after end {end}.")
            }
            AnalysisError::Stalled => {
                write!(f, "No progress over the interval; ETA is infinite.")
            }
            AnalysisError::Regressing { speed } => {
                write!(f, "Quantity is regressing ({speed:.2}/day); ETA is undefined.")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        let code = match err {
            AnalysisError::EmptySeries => 3,
            _ => 4,
        };
        AppError::new(code, err.to_string())
    }
}
