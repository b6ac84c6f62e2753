//! Static analysis result structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Explicit marker for source the grammar could not parse.
///
/// Returned in place of numeric metrics so callers can tell unparseable code
/// apart from empty code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub reason: String,
    /// 1-indexed line of the first syntax error, when known
    pub line: Option<usize>,
}

impl ParseFailure {
    pub fn new(reason: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            reason: reason.into(),
            line,
        }
    }

    pub fn invalid_syntax(line: Option<usize>) -> Self {
        match line {
            Some(line) => Self::new(format!("invalid syntax at line {}", line), Some(line)),
            None => Self::new("invalid syntax", None),
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax Error: {}", self.reason)
    }
}

/// Result of a metric that needs a syntax tree
pub type MetricResult<T> = std::result::Result<T, ParseFailure>;

/// Kinds of issue detected in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingKind {
    HardcodedCredential,
    PlaceholderComment,
    DuplicateImport,
}

impl FindingKind {
    /// Human-readable description used in reports
    pub fn description(self) -> &'static str {
        match self {
            FindingKind::HardcodedCredential => "Potential hardcoded credential detected.",
            FindingKind::PlaceholderComment => "Unfinished placeholder/TODO found.",
            FindingKind::DuplicateImport => "Duplicate imports detected.",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Halstead-style vocabulary and volume estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetrics {
    pub vocabulary: usize,
    pub volume: f64,
}

/// Metrics of a successfully parsed source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    pub vocabulary: usize,
    pub volume: f64,
    pub doc_coverage_percent: f64,
    pub findings: Vec<FindingKind>,
}

impl AnalysisMetrics {
    pub fn new(volume: VolumeMetrics, doc_coverage_percent: f64, findings: Vec<FindingKind>) -> Self {
        Self {
            vocabulary: volume.vocabulary,
            volume: volume.volume,
            doc_coverage_percent,
            findings,
        }
    }
}

/// Full static analysis outcome for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisReport {
    Parsed {
        metrics: AnalysisMetrics,
        /// Average cyclomatic complexity of the file's functions
        complexity: f64,
    },
    ParseFailure {
        failure: ParseFailure,
        /// Text-pattern findings still evaluated without a tree
        findings: Vec<FindingKind>,
    },
}

impl AnalysisReport {
    pub fn findings(&self) -> &[FindingKind] {
        match self {
            AnalysisReport::Parsed { metrics, .. } => &metrics.findings,
            AnalysisReport::ParseFailure { findings, .. } => findings,
        }
    }

    pub fn metrics(&self) -> Option<&AnalysisMetrics> {
        match self {
            AnalysisReport::Parsed { metrics, .. } => Some(metrics),
            AnalysisReport::ParseFailure { .. } => None,
        }
    }

    pub fn complexity(&self) -> Option<f64> {
        match self {
            AnalysisReport::Parsed { complexity, .. } => Some(*complexity),
            AnalysisReport::ParseFailure { .. } => None,
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self, AnalysisReport::ParseFailure { .. })
    }

    pub fn has_finding(&self, kind: FindingKind) -> bool {
        self.findings().contains(&kind)
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
