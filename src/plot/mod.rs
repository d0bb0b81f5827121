//! Chart rendering for terminal output.
//!
//! - deterministic fixed-grid ASCII chart (`ascii`)
//!
//! The interactive chart lives in `crate::tui`; both draw the same series.

pub mod ascii;

pub use ascii::*;
