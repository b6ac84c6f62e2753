//! Full benchmark runs over a dataset tree

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;
use vibebench::{BenchRunner, Category, ExecutionStatus, FindingKind, Settings};

fn python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// datasets/
///   gpt/sorter.py         ok
///   gpt/creds.py          hardcoded credential
///   claude/broken.py      syntax error
///   human_samples/ref.py  baseline
///   loose.py              dataset root
///   gpt/__pycache__/x.py  excluded
///   gpt/notes.txt         wrong extension
fn create_dataset(root: &Path) {
    for dir in ["gpt/__pycache__", "claude", "human_samples"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(
        root.join("gpt/sorter.py"),
        "def sort(xs):\n    \"\"\"Sort.\"\"\"\n    return sorted(xs)\n\nprint(sort([3, 1, 2]))\n",
    )
    .unwrap();
    fs::write(
        root.join("gpt/creds.py"),
        "SECRET_TOKEN = 'A1b2C3d4E5f6'\nprint('ok')\n",
    )
    .unwrap();
    fs::write(root.join("claude/broken.py"), "def f(:\n    pass\n").unwrap();
    fs::write(root.join("human_samples/ref.py"), "print('reference')\n").unwrap();
    fs::write(root.join("loose.py"), "x = 1\n").unwrap();
    fs::write(root.join("gpt/__pycache__/x.py"), "print('cached')\n").unwrap();
    fs::write(root.join("gpt/notes.txt"), "not python\n").unwrap();
}

fn settings(root: &Path, skip_execution: bool) -> Settings {
    Settings {
        dataset_path: root.to_path_buf(),
        skip_execution,
        jobs: 2,
        ..Settings::default()
    }
}

#[test]
fn test_static_only_run() {
    let dataset = tempdir().unwrap();
    create_dataset(dataset.path());

    let results = BenchRunner::new(settings(dataset.path(), true))
        .unwrap()
        .run()
        .unwrap();

    let labels: Vec<(String, String)> = results
        .records
        .iter()
        .map(|r| (r.model.clone(), r.file.clone()))
        .collect();
    assert_eq!(labels.len(), 5);
    assert!(labels.contains(&("root".to_string(), "loose.py".to_string())));
    assert!(!labels.iter().any(|(_, file)| file == "x.py" || file == "notes.txt"));

    let reference = results
        .records
        .iter()
        .find(|r| r.file == "ref.py")
        .unwrap();
    assert_eq!(reference.category, Category::BenchmarkReference);
    assert!(results
        .records
        .iter()
        .filter(|r| r.file != "ref.py")
        .all(|r| r.category == Category::AiSynthesis));

    assert!(results.records.iter().all(|r| r.execution.is_none()));
    assert_eq!(results.summary.skipped_executions, 5);
    assert_eq!(results.summary.parse_failures, 1);
    assert_eq!(results.summary.credential_alerts, 1);

    let creds = results.credential_alerts().next().unwrap();
    assert_eq!(creds.file, "creds.py");
    assert!(creds.analysis.has_finding(FindingKind::HardcodedCredential));
}

#[test]
fn test_run_with_execution() {
    if !python_available() {
        return;
    }
    let dataset = tempdir().unwrap();
    create_dataset(dataset.path());

    let results = BenchRunner::new(settings(dataset.path(), false))
        .unwrap()
        .run()
        .unwrap();

    let status_of = |file: &str| {
        results
            .records
            .iter()
            .find(|r| r.file == file)
            .and_then(|r| r.execution_status())
    };

    assert_eq!(status_of("sorter.py"), Some(ExecutionStatus::Success));
    assert_eq!(status_of("ref.py"), Some(ExecutionStatus::Success));
    assert_eq!(status_of("broken.py"), Some(ExecutionStatus::RuntimeError));
    assert_eq!(results.summary.successes, 4);
    assert_eq!(results.summary.runtime_errors, 1);

    let sorter = results.records.iter().find(|r| r.file == "sorter.py").unwrap();
    assert_eq!(sorter.execution.as_ref().unwrap().stdout_preview(), "[1, 2, 3]");
}

#[test]
fn test_progress_reports_every_file() {
    let dataset = tempdir().unwrap();
    create_dataset(dataset.path());

    let seen = std::sync::Mutex::new(Vec::new());
    let results = BenchRunner::new(settings(dataset.path(), true))
        .unwrap()
        .run_with_progress(|update, target| {
            seen.lock().unwrap().push((update.current, target.file.clone()));
        })
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), results.records.len());
    assert!(seen.iter().all(|(current, _)| *current >= 1 && *current <= 5));
}
