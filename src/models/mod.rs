//! Data models and structures for VibeBench

pub mod analysis;
pub mod config;
pub mod execution;
pub mod record;
pub mod source;

pub use analysis::{
    AnalysisMetrics, AnalysisReport, FindingKind, MetricResult, ParseFailure, VolumeMetrics,
};
pub use config::{OutputFormat, Settings};
pub use execution::{ExecutionOutcome, ExecutionStatus, ResourceLimits};
pub use record::{BenchmarkResults, BenchmarkSummary, Category, FileRecord};
pub use source::SourceUnit;
