//! VibeBench - static and sandboxed dynamic evaluation of generated Python code
//!
//! This library discovers Python files under a dataset directory, measures
//! them statically (complexity, vocabulary volume, documentation coverage,
//! suspicious patterns) and runs each one in a child process under CPU-time,
//! memory and wall-clock limits.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{BenchRunner, SandboxedExecutor, StaticAnalyzer};
pub use error::{handle_error, try_with_recovery, BenchError, ErrorSeverity, OptionExt, Result, ResultExt};
pub use models::{
    analysis::{AnalysisMetrics, AnalysisReport, FindingKind, ParseFailure, VolumeMetrics},
    config::Settings,
    execution::{ExecutionOutcome, ExecutionStatus, ResourceLimits},
    record::{BenchmarkResults, BenchmarkSummary, Category, FileRecord},
    source::SourceUnit,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
