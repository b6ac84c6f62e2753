//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{BenchError, Result};
use crate::models::analysis::{AnalysisReport, FindingKind};
use crate::models::execution::ExecutionStatus;
use crate::models::record::{BenchmarkResults, FileRecord};
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

/// Label for the analysis column when the file did not parse
const PARSE_FAILURE_LABEL: &str = "Syntax Error";

/// Label for records whose execution was skipped
const SKIPPED_LABEL: &str = "Skipped";

fn complexity_cell(record: &FileRecord) -> String {
    match record.analysis.complexity() {
        Some(complexity) => format!("{:.2}", complexity),
        None => PARSE_FAILURE_LABEL.to_string(),
    }
}

fn doc_coverage_cell(record: &FileRecord) -> String {
    match record.analysis.metrics() {
        Some(metrics) => format!("{:.2}%", metrics.doc_coverage_percent),
        None => "N/A".to_string(),
    }
}

fn status_cell(record: &FileRecord) -> String {
    match record.execution_status() {
        Some(status) => status.to_string(),
        None => SKIPPED_LABEL.to_string(),
    }
}

fn exec_time_cell(record: &FileRecord) -> String {
    match record.execution_secs() {
        Some(secs) => format!("{:.4}s", secs),
        None => "N/A".to_string(),
    }
}

fn paint_status(record: &FileRecord, use_colors: bool) -> String {
    let label = status_cell(record);
    if !use_colors {
        return label;
    }
    match record.execution_status() {
        Some(ExecutionStatus::Success) => Green.paint(label).to_string(),
        Some(ExecutionStatus::RuntimeError) => Red.paint(label).to_string(),
        Some(ExecutionStatus::Timeout) => Yellow.bold().paint(label).to_string(),
        Some(ExecutionStatus::InfrastructureError) => Red.bold().paint(label).to_string(),
        None => Style::new().dimmed().paint(label).to_string(),
    }
}

/// Format a single record as text
pub fn format_record_text(record: &FileRecord, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    let name = format!("{}/{}", record.model, record.file);
    if use_colors {
        output.push_str(&format!("{}", Blue.bold().paint(name)));
    } else {
        output.push_str(&name);
    }
    output.push_str(&format!(
        "  complexity {}  docs {}  findings {}  {} ({})\n",
        complexity_cell(record),
        doc_coverage_cell(record),
        record.analysis.findings().len(),
        paint_status(record, use_colors),
        exec_time_cell(record),
    ));

    if verbose {
        output.push_str(&format!("  Category: {}\n", record.category));
        output.push_str(&format!("  Path: {}\n", record.path.display()));

        match &record.analysis {
            AnalysisReport::Parsed { metrics, .. } => {
                output.push_str(&format!(
                    "  Vocabulary: {}  Volume: {:.2}\n",
                    metrics.vocabulary, metrics.volume
                ));
            }
            AnalysisReport::ParseFailure { failure, .. } => {
                output.push_str(&format!("  {}\n", failure));
            }
        }

        for finding in record.analysis.findings() {
            let line = format!("  ! {}", finding);
            if use_colors {
                output.push_str(&format!("{}\n", Yellow.paint(line)));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        if let Some(execution) = &record.execution {
            if let Some(message) = execution.message() {
                output.push_str(&format!("  Message: {}\n", message));
            }
            if !execution.stdout_preview().is_empty() {
                output.push_str(&format!("  Stdout: {}\n", execution.stdout_preview()));
            }
            if let Some(last_line) = execution.stderr().lines().last() {
                output.push_str(&format!("  Stderr: {}\n", last_line));
            }
        }
    }

    output
}

/// Format benchmark results as text
pub fn format_results_text(results: &BenchmarkResults, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();
    let summary = &results.summary;

    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Benchmark Summary")));
    } else {
        output.push_str("Benchmark Summary\n\n");
    }

    output.push_str(&format!("Dataset: {}\n", results.dataset_path.display()));
    output.push_str(&format!("Total files: {}\n", summary.total_files));
    output.push_str(&format!("Parse failures: {}\n", summary.parse_failures));
    output.push_str(&format!(
        "Executions: {} success, {} runtime error, {} timeout, {} infrastructure error, {} skipped\n",
        summary.successes,
        summary.runtime_errors,
        summary.timeouts,
        summary.infrastructure_errors,
        summary.skipped_executions,
    ));
    output.push_str(&format!("Average complexity: {:.2}\n", summary.average_complexity));
    output.push_str(&format!("Average doc coverage: {:.2}%\n", summary.average_doc_coverage));
    output.push_str(&format!(
        "Average execution time: {:.4}s\n",
        summary.average_execution_secs
    ));
    output.push_str(&format!("Files with findings: {}\n", summary.files_with_findings));
    output.push_str(&format!("Run duration: {}ms\n", results.duration_ms));

    if summary.credential_alerts > 0 {
        let line = format!("Credential alerts: {}", summary.credential_alerts);
        if use_colors {
            output.push_str(&format!("\n{}\n", Red.bold().paint(line)));
        } else {
            output.push_str(&format!("\n{}\n", line));
        }
    }

    if !results.records.is_empty() {
        output.push_str("\nFiles:\n\n");
        for record in &results.records {
            output.push_str(&format_record_text(record, use_colors, verbose));
        }
    }

    output
}

/// Format benchmark results as JSON
pub fn format_results_json(results: &BenchmarkResults) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(|e| BenchError::JsonSerialize { source: e })
}

fn file_list(records: &[&FileRecord]) -> String {
    records
        .iter()
        .map(|record| format!("`{}/{}`", record.model, record.file))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format benchmark results as a Markdown report
pub fn format_results_markdown(results: &BenchmarkResults) -> String {
    let summary = &results.summary;
    let mut md = String::new();

    md.push_str("# VibeBench Analysis Report\n");
    md.push_str(&format!(
        "**Date:** {}\n\n",
        results.started_at.format("%Y-%m-%d %H:%M UTC")
    ));

    md.push_str("## Executive Summary\n");
    md.push_str(&format!("- **Total Scripts Analyzed:** {}\n", summary.total_files));
    md.push_str(&format!("- **Parse Failures:** {}\n", summary.parse_failures));
    md.push_str(&format!(
        "- **Average Cyclomatic Complexity:** {:.2}\n",
        summary.average_complexity
    ));
    md.push_str(&format!(
        "- **Average Doc Coverage:** {:.2}%\n",
        summary.average_doc_coverage
    ));
    md.push_str(&format!(
        "- **Average Execution Time:** {:.4}s\n",
        summary.average_execution_secs
    ));
    md.push_str(&format!(
        "- **Execution Outcomes:** {} success / {} runtime error / {} timeout / {} infrastructure error / {} skipped\n\n",
        summary.successes,
        summary.runtime_errors,
        summary.timeouts,
        summary.infrastructure_errors,
        summary.skipped_executions,
    ));

    md.push_str("## Detailed File Analysis\n");
    md.push_str("| File | Model | Complexity | Doc Coverage | Findings | Status | Exec Time |\n");
    md.push_str("| :--- | :--- | :---: | :---: | :---: | :---: | :---: |\n");
    for record in &results.records {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            record.file,
            record.model,
            complexity_cell(record),
            doc_coverage_cell(record),
            record.analysis.findings().len(),
            status_cell(record),
            exec_time_cell(record),
        ));
    }

    md.push_str("\n## Key Insights\n");
    let alerts: Vec<&FileRecord> = results.credential_alerts().collect();
    if alerts.is_empty() {
        md.push_str("- No hardcoded credentials detected.\n");
    } else {
        md.push_str(&format!(
            "- **Security Alert:** {} files contain potential hardcoded credentials: {}\n",
            alerts.len(),
            file_list(&alerts)
        ));
    }

    let timeouts: Vec<&FileRecord> = results.timeouts().collect();
    if !timeouts.is_empty() {
        md.push_str(&format!(
            "- **Timeouts:** {} files exceeded the wall-clock limit: {}\n",
            timeouts.len(),
            file_list(&timeouts)
        ));
    }

    md.push_str(
        "- *Recommendation:* Compare these results against the benchmark reference samples to measure the gap between generated and human-written code.\n",
    );

    md
}

fn findings_cell(findings: &[FindingKind]) -> String {
    findings
        .iter()
        .map(|kind| format!("{:?}", kind))
        .collect::<Vec<_>>()
        .join(";")
}

/// Format benchmark results as CSV
pub fn format_results_csv(results: &BenchmarkResults) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Model",
        "Category",
        "File",
        "Path",
        "Parsed",
        "Complexity",
        "Vocabulary",
        "Volume",
        "Doc Coverage",
        "Findings",
        "Status",
        "Exec Time (s)",
        "Analyzed At",
    ])?;

    for record in &results.records {
        let metrics = record.analysis.metrics();
        writer.write_record([
            record.model.clone(),
            record.category.to_string(),
            record.file.clone(),
            record.path.display().to_string(),
            (!record.analysis.is_parse_failure()).to_string(),
            record
                .analysis
                .complexity()
                .map(|c| c.to_string())
                .unwrap_or_default(),
            metrics.map(|m| m.vocabulary.to_string()).unwrap_or_default(),
            metrics.map(|m| m.volume.to_string()).unwrap_or_default(),
            metrics
                .map(|m| m.doc_coverage_percent.to_string())
                .unwrap_or_default(),
            findings_cell(record.analysis.findings()),
            status_cell(record),
            record
                .execution_secs()
                .map(|secs| secs.to_string())
                .unwrap_or_default(),
            record.analyzed_at.to_rfc3339(),
        ])?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| BenchError::io_error(e.into_error()))?;
    String::from_utf8(buffer).map_err(|e| BenchError::CsvSerialize { source: e })
}
