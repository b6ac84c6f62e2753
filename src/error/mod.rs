//! Error handling for VibeBench
//!
//! Error types, result aliases, and error context utilities for the harness.

pub mod context;
pub mod types;

pub use context::{handle_error, try_with_recovery, OptionExt, ResultExt};
pub use types::{BenchError, ErrorSeverity, Result};
