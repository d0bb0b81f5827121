//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the record grammar (`RecordGrammar`) the log parser is configured with
//! - dated observations (`Record`)
//! - run configuration (`RunConfig`, `ChartMode`, `Window`)

pub mod types;

pub use types::*;
