//! Core functionality: static analysis, sandboxed execution and the
//! benchmark pipeline that combines them

pub mod analyzer;
pub mod bench;
pub mod complexity;
pub mod discovery;
pub mod executor;
pub mod findings;
pub mod limits;
pub mod parallel;
pub mod runner;

pub use analyzer::StaticAnalyzer;
pub use bench::BenchRunner;
pub use discovery::{BenchTarget, DatasetScanner};
pub use executor::SandboxedExecutor;
pub use runner::{ResourceLimitedRunner, RunOutcome};
