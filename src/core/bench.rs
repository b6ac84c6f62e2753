//! Benchmark orchestration
//!
//! Discovers targets, then analyzes and executes each one on a bounded
//! worker pool. Every target yields exactly one [`FileRecord`]; a failure on
//! one file never stops the others.

use crate::core::analyzer::StaticAnalyzer;
use crate::core::discovery::{BenchTarget, DatasetScanner};
use crate::core::executor::SandboxedExecutor;
use crate::core::parallel::{self, ProgressUpdate};
use crate::error::{handle_error, BenchError, Result};
use crate::models::analysis::{AnalysisReport, ParseFailure};
use crate::models::config::Settings;
use crate::models::execution::ExecutionOutcome;
use crate::models::record::{BenchmarkResults, FileRecord};
use chrono::Utc;
use std::fs;
use std::time::Instant;
use tracing::info;

/// Runs the full benchmark described by a [`Settings`]
pub struct BenchRunner {
    settings: Settings,
    scanner: DatasetScanner,
    analyzer: StaticAnalyzer,
    executor: SandboxedExecutor,
}

impl BenchRunner {
    pub fn new(settings: Settings) -> Result<Self> {
        let scanner = DatasetScanner::from_settings(&settings)?;
        let executor = SandboxedExecutor::from_settings(&settings)?;
        Ok(Self {
            settings,
            scanner,
            analyzer: StaticAnalyzer::new(),
            executor,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run without progress reporting
    pub fn run(&self) -> Result<BenchmarkResults> {
        self.run_with_progress(|_, _| {})
    }

    /// Run, invoking `progress` after each file completes
    pub fn run_with_progress<P>(&self, progress: P) -> Result<BenchmarkResults>
    where
        P: Fn(ProgressUpdate, &BenchTarget) + Send + Sync,
    {
        let started_at = Utc::now();
        let clock = Instant::now();

        let targets = self.scanner.discover()?;
        info!(
            count = targets.len(),
            jobs = self.settings.jobs,
            dataset = %self.settings.dataset_path.display(),
            "starting benchmark"
        );

        let pool = parallel::build_pool(self.settings.jobs)?;
        let records =
            parallel::parallel_process_with_progress(&pool, targets, |t| self.evaluate(t), progress);

        Ok(BenchmarkResults::new(
            self.settings.dataset_path.clone(),
            records,
            started_at,
            clock.elapsed(),
        ))
    }

    /// Build the record for one target
    pub fn evaluate(&self, target: &BenchTarget) -> FileRecord {
        let (analysis, execution) = match fs::read_to_string(&target.path) {
            Ok(text) => {
                let analysis = self.analyzer.analyze_text(text);
                let execution = self.execute(target);
                (analysis, execution)
            }
            Err(source) => {
                let err = BenchError::source_read(&target.path, source);
                let reason = err.to_string();
                handle_error(err);
                let analysis = AnalysisReport::ParseFailure {
                    failure: ParseFailure::new(format!("unreadable: {}", reason), None),
                    findings: Vec::new(),
                };
                let execution = (!self.settings.skip_execution)
                    .then(|| ExecutionOutcome::infrastructure(reason));
                (analysis, execution)
            }
        };

        info!(
            path = %target.path.display(),
            model = %target.model,
            parse_failure = analysis.is_parse_failure(),
            "file evaluated"
        );

        FileRecord {
            model: target.model.clone(),
            category: target.category,
            file: target.file.clone(),
            path: target.path.clone(),
            analysis,
            execution,
            analyzed_at: Utc::now(),
        }
    }

    fn execute(&self, target: &BenchTarget) -> Option<ExecutionOutcome> {
        if self.settings.skip_execution {
            None
        } else {
            Some(self.executor.run(&target.path))
        }
    }
}
