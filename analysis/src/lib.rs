//! Validation and cleanup of demo parser output.
//!
//! The parser writes one JSON document per demo. Its rounds can be duplicated,
//! carry warmup or knife rounds, miss frames or have scores that do not add
//! up. This crate finds those rounds, drops them, renumbers what is left and
//! can flatten the result into tables.

pub mod clean;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod renumber;
pub mod tabular;
pub mod validate;

mod demo;

pub use demo::{CleanOutput, Demo};
pub use error::{CleanError, Result};
pub use options::{CleanOptions, MatchFormat, ReturnType};
