//! Static analysis of realistic generated files

use vibebench::{AnalysisReport, FindingKind, StaticAnalyzer};

const DOCUMENTED: &str = r#""""Stack utilities."""
import os
import sys


class Stack:
    """A simple LIFO stack."""

    def push(self, item):
        self.items.append(item)


def clamp(x):
    """Clamp into the open interval (0, 10)."""
    if x > 0 and x < 10:
        return x
    return -x
"#;

const SLOPPY: &str = r#"import os
import os.path
import json

API_KEY = "abcd1234efgh5678"


def load(path):
    # TODO: handle missing files
    with open(path) as handle:
        return json.load(handle)
"#;

#[test]
fn test_documented_module() {
    let report = StaticAnalyzer::new().analyze_text(DOCUMENTED);

    let AnalysisReport::Parsed { metrics, complexity } = report else {
        panic!("expected a parsed report, got {:?}", report);
    };
    // Stack and clamp documented, push not
    assert_eq!(metrics.doc_coverage_percent, 66.67);
    // push = 1, clamp = 1 + if + and = 3
    assert_eq!(complexity, 2.0);
    assert!(metrics.findings.is_empty());
    assert!(metrics.vocabulary > 0);
    assert!(metrics.volume >= metrics.vocabulary as f64);
}

#[test]
fn test_sloppy_module_findings() {
    let report = StaticAnalyzer::new().analyze_text(SLOPPY);

    assert!(!report.is_parse_failure());
    assert!(report.has_finding(FindingKind::HardcodedCredential));
    assert!(report.has_finding(FindingKind::PlaceholderComment));
    assert!(report.has_finding(FindingKind::DuplicateImport));
    assert_eq!(report.findings().len(), 3);
    // load = 1 + with
    assert_eq!(report.complexity(), Some(2.0));
    assert_eq!(report.metrics().unwrap().doc_coverage_percent, 0.0);
}

#[test]
fn test_syntax_error_keeps_text_findings() {
    let source = "def broken(:\n    password = \"supersecret1\"\n    # FIXME\n";
    let analyzer = StaticAnalyzer::new();
    let unit = analyzer.source_unit(source);

    assert!(!unit.is_parsed());
    assert!(StaticAnalyzer::compute_doc_coverage(&unit).is_err());
    assert!(StaticAnalyzer::compute_volume_metrics(&unit).is_err());

    match StaticAnalyzer::analyze(&unit) {
        AnalysisReport::ParseFailure { failure, findings } => {
            assert!(failure.to_string().starts_with("Syntax Error"));
            assert_eq!(
                findings,
                vec![FindingKind::HardcodedCredential, FindingKind::PlaceholderComment]
            );
        }
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

#[test]
fn test_python2_print_is_a_parse_failure() {
    let analyzer = StaticAnalyzer::new();
    let unit = analyzer.source_unit("import os\nimport os\n\nprint \"hello\"  # TODO\n");

    assert!(!unit.is_parsed());
    assert_eq!(unit.parse_failure().and_then(|failure| failure.line), Some(4));
    match StaticAnalyzer::analyze(&unit) {
        // the duplicate import needs a tree and is not evaluated
        AnalysisReport::ParseFailure { findings, .. } => {
            assert_eq!(findings, vec![FindingKind::PlaceholderComment]);
        }
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

#[test]
fn test_empty_file() {
    let report = StaticAnalyzer::new().analyze_text("");
    let metrics = report.metrics().unwrap();
    assert_eq!(metrics.doc_coverage_percent, 100.0);
    assert_eq!(metrics.vocabulary, 0);
    assert_eq!(metrics.volume, 0.0);
    assert_eq!(report.complexity(), Some(0.0));
}

#[test]
fn test_analysis_is_repeatable() {
    let analyzer = StaticAnalyzer::new();
    assert_eq!(analyzer.analyze_text(SLOPPY), analyzer.analyze_text(SLOPPY));
}
