//! Static analysis of source files
//!
//! Computes vocabulary/volume, documentation coverage, cyclomatic complexity
//! and suspicious-pattern findings from a [`SourceUnit`]. Nothing here
//! executes the analyzed code or touches the filesystem.

use crate::core::{complexity, findings};
use crate::models::analysis::{
    round_to, AnalysisMetrics, AnalysisReport, FindingKind, MetricResult, VolumeMetrics,
};
use crate::models::source::SourceUnit;
use crate::parsers::{NodeKind, OperatorKind, PythonParser};
use std::collections::HashSet;

/// Stateless analyzer; safe to share across worker threads
#[derive(Clone, Default)]
pub struct StaticAnalyzer {
    parser: PythonParser,
}

impl StaticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into a unit ready for analysis
    pub fn source_unit(&self, text: impl Into<String>) -> SourceUnit {
        SourceUnit::with_parser(&self.parser, text)
    }

    /// Parse and analyze `text` in one step
    pub fn analyze_text(&self, text: impl Into<String>) -> AnalysisReport {
        Self::analyze(&self.source_unit(text))
    }

    /// Distinct operator kinds plus distinct operands, and the derived volume
    pub fn compute_volume_metrics(unit: &SourceUnit) -> MetricResult<VolumeMetrics> {
        let tree = unit.tree()?;

        let mut operators: HashSet<OperatorKind> = HashSet::new();
        let mut operands: HashSet<String> = HashSet::new();

        for node in tree.walk() {
            match &node.kind {
                NodeKind::Operation(ops) => operators.extend(ops.iter().copied()),
                NodeKind::Name(name) => {
                    operands.insert(format!("name:{}", name));
                }
                NodeKind::Constant { kind, text } => {
                    operands.insert(format!("{}:{}", kind.as_str(), text));
                }
                _ => {}
            }
        }

        let vocabulary = operators.len() + operands.len();
        Ok(VolumeMetrics {
            vocabulary,
            volume: round_to((vocabulary * bit_length(vocabulary)) as f64, 2),
        })
    }

    /// Percentage of function and class definitions with a docstring.
    /// Source without definitions is fully covered.
    pub fn compute_doc_coverage(unit: &SourceUnit) -> MetricResult<f64> {
        let tree = unit.tree()?;

        let (total, documented) = tree.definitions().fold((0usize, 0usize), |(total, documented), node| {
            let has_doc = matches!(&node.kind, NodeKind::Definition { docstring: Some(_), .. });
            (total + 1, documented + usize::from(has_doc))
        });

        if total == 0 {
            return Ok(100.0);
        }
        Ok(round_to(100.0 * documented as f64 / total as f64, 2))
    }

    /// Findings in detection order. DuplicateImport is only evaluated when
    /// the source parsed.
    pub fn detect_findings(unit: &SourceUnit) -> Vec<FindingKind> {
        let mut found = findings::text_findings(unit.text());
        if let Ok(tree) = unit.tree() {
            found.extend(findings::detect_duplicate_import(tree));
        }
        found
    }

    /// Full analysis: metrics and complexity, or the parse failure together
    /// with the text-only findings
    pub fn analyze(unit: &SourceUnit) -> AnalysisReport {
        let findings = Self::detect_findings(unit);

        let tree = match unit.tree() {
            Ok(tree) => tree,
            Err(failure) => return AnalysisReport::ParseFailure { failure, findings },
        };

        let metrics = Self::compute_volume_metrics(unit)
            .and_then(|volume| {
                Self::compute_doc_coverage(unit)
                    .map(|coverage| AnalysisMetrics::new(volume, coverage, findings.clone()))
            });

        match metrics {
            Ok(metrics) => AnalysisReport::Parsed {
                metrics,
                complexity: complexity::average_complexity(tree),
            },
            Err(failure) => AnalysisReport::ParseFailure { failure, findings },
        }
    }
}

/// Number of bits needed to represent `n`; 0 for 0
fn bit_length(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}
