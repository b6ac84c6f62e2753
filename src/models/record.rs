//! Per-file benchmark records and the aggregate results of a run

use super::analysis::{round_to, AnalysisReport, FindingKind};
use super::execution::{ExecutionOutcome, ExecutionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Whether a file is human-written reference code or model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Benchmark Reference")]
    BenchmarkReference,
    #[serde(rename = "AI Synthesis")]
    AiSynthesis,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::BenchmarkReference => write!(f, "Benchmark Reference"),
            Category::AiSynthesis => write!(f, "AI Synthesis"),
        }
    }
}

/// Everything measured about one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Model label (the dataset sub-folder the file came from)
    pub model: String,
    pub category: Category,
    /// File name without directories
    pub file: String,
    pub path: PathBuf,
    pub analysis: AnalysisReport,
    /// `None` when execution was skipped by configuration
    pub execution: Option<ExecutionOutcome>,
    pub analyzed_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn execution_status(&self) -> Option<ExecutionStatus> {
        self.execution.as_ref().map(ExecutionOutcome::status)
    }

    pub fn execution_secs(&self) -> Option<f64> {
        self.execution.as_ref().and_then(ExecutionOutcome::duration_secs)
    }
}

/// Aggregate statistics over all records of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub total_files: usize,
    pub parse_failures: usize,
    pub successes: usize,
    pub runtime_errors: usize,
    pub timeouts: usize,
    pub infrastructure_errors: usize,
    pub skipped_executions: usize,
    /// Mean over parsed files
    pub average_complexity: f64,
    /// Mean over parsed files
    pub average_doc_coverage: f64,
    /// Mean over files with a measured duration
    pub average_execution_secs: f64,
    pub files_with_findings: usize,
    pub credential_alerts: usize,
}

impl BenchmarkSummary {
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut summary = BenchmarkSummary {
            total_files: records.len(),
            ..Default::default()
        };

        let mut complexity = Vec::new();
        let mut coverage = Vec::new();
        let mut durations = Vec::new();

        for record in records {
            match &record.analysis {
                AnalysisReport::Parsed {
                    metrics,
                    complexity: value,
                } => {
                    complexity.push(*value);
                    coverage.push(metrics.doc_coverage_percent);
                }
                AnalysisReport::ParseFailure { .. } => summary.parse_failures += 1,
            }

            if !record.analysis.findings().is_empty() {
                summary.files_with_findings += 1;
            }
            if record.analysis.has_finding(FindingKind::HardcodedCredential) {
                summary.credential_alerts += 1;
            }

            match record.execution_status() {
                Some(ExecutionStatus::Success) => summary.successes += 1,
                Some(ExecutionStatus::RuntimeError) => summary.runtime_errors += 1,
                Some(ExecutionStatus::Timeout) => summary.timeouts += 1,
                Some(ExecutionStatus::InfrastructureError) => summary.infrastructure_errors += 1,
                None => summary.skipped_executions += 1,
            }
            if let Some(secs) = record.execution_secs() {
                durations.push(secs);
            }
        }

        summary.average_complexity = round_to(mean(&complexity), 2);
        summary.average_doc_coverage = round_to(mean(&coverage), 2);
        summary.average_execution_secs = round_to(mean(&durations), 4);
        summary
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Results of benchmarking a dataset directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub dataset_path: PathBuf,
    /// Sorted by path
    pub records: Vec<FileRecord>,
    pub summary: BenchmarkSummary,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl BenchmarkResults {
    pub fn new(
        dataset_path: PathBuf,
        mut records: Vec<FileRecord>,
        started_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        records.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = BenchmarkSummary::from_records(&records);
        Self {
            dataset_path,
            records,
            summary,
            started_at,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    /// Records flagged with a hardcoded credential
    pub fn credential_alerts(&self) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(|r| r.analysis.has_finding(FindingKind::HardcodedCredential))
    }

    /// Records whose execution hit the wall-clock timeout
    pub fn timeouts(&self) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(|r| r.execution_status() == Some(ExecutionStatus::Timeout))
    }
}
