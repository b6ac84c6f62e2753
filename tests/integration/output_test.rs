use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use vibebench::{
    error::Result,
    models::config::OutputFormat,
    output::{create_formatter, create_writer, Formatter, OutputWriter},
    BenchmarkResults, Category, ExecutionOutcome, FileRecord, StaticAnalyzer,
};

fn record(model: &str, file: &str, source: &str, execution: Option<ExecutionOutcome>) -> FileRecord {
    FileRecord {
        model: model.to_string(),
        category: Category::AiSynthesis,
        file: file.to_string(),
        path: PathBuf::from("datasets").join(model).join(file),
        analysis: StaticAnalyzer::new().analyze_text(source),
        execution,
        analyzed_at: Utc::now(),
    }
}

fn create_test_results() -> BenchmarkResults {
    BenchmarkResults::new(
        PathBuf::from("datasets"),
        vec![
            record(
                "gpt",
                "ok.py",
                "print('hi')\n",
                Some(ExecutionOutcome::Success {
                    duration_secs: 0.021,
                    stdout_preview: "hi".to_string(),
                    stderr: String::new(),
                }),
            ),
            record(
                "gemini",
                "stuck.py",
                "while True:\n    pass\n",
                Some(ExecutionOutcome::Timeout {
                    message: "Exceeded 5s".to_string(),
                    stdout_preview: String::new(),
                    stderr: String::new(),
                }),
            ),
        ],
        Utc::now(),
        Duration::from_secs(6),
    )
}

#[test]
fn test_every_format_renders() -> Result<()> {
    let results = create_test_results();

    for format in [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Csv,
    ] {
        let content = create_formatter(&format, false, false, false).format(&results)?;
        assert!(content.contains("stuck.py"), "{} output lacks a file", format);
    }

    Ok(())
}

#[test]
fn test_json_report_written_to_file() -> Result<()> {
    let results = create_test_results();
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("results.json");

    let content = create_formatter(&OutputFormat::Json, false, false, false).format(&results)?;
    create_writer(Some(&path)).write(&content)?;

    let parsed: BenchmarkResults = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(parsed.summary.timeouts, 1);
    assert_eq!(parsed.summary.successes, 1);
    assert_eq!(parsed.records[0].model, "gemini");
    assert_eq!(parsed.records, results.records);

    Ok(())
}

#[test]
fn test_markdown_flags_timeouts() -> Result<()> {
    let results = create_test_results();
    let content = create_formatter(&OutputFormat::Markdown, false, false, false).format(&results)?;

    assert!(content.contains("- No hardcoded credentials detected."));
    assert!(content.contains("`gemini/stuck.py`"));
    Ok(())
}
