//! Input helpers.
//!
//! - flat-log parsing + line accounting (`parse`)

pub mod parse;

pub use parse::*;
