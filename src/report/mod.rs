//! Reporting utilities: the formatted terminal summary.
//!
//! We keep formatting code in one place so:
//! - the parsing/analysis code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
