use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;
use vibebench::cli::args::{Args, OutputFormat};
use vibebench::cli::Command as BenchCommand;

#[test]
fn test_cli_args_parsing() {
    // Defaults
    let args = Args::parse_from(["vibebench"]);
    assert_eq!(args.path, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.output, None);
    assert_eq!(args.output_file, None);
    assert_eq!(args.timeout, None);
    assert!(!args.skip_execution);
    assert!(!args.quiet);
    assert!(!args.verbose);

    let args = Args::parse_from([
        "vibebench",
        "--path",
        "/test/datasets",
        "--exclude",
        "**/drafts/**",
        "--interpreter",
        "pypy3",
        "-t",
        "3",
        "-j",
        "4",
        "--output",
        "csv",
        "--output-file",
        "results.csv",
        "--quiet",
        "--skip-execution",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/test/datasets")));
    assert_eq!(args.exclude, vec!["**/drafts/**".to_string()]);
    assert_eq!(args.interpreter.as_deref(), Some("pypy3"));
    assert_eq!(args.timeout, Some(3));
    assert_eq!(args.jobs, Some(4));
    assert_eq!(args.output, Some(OutputFormat::Csv));
    assert_eq!(args.output_file, Some(PathBuf::from("results.csv")));
    assert!(args.quiet);
    assert!(args.skip_execution);
}

#[test]
fn test_cli_config_option() {
    let args = Args::parse_from(["vibebench", "--config", "custom-config.toml"]);
    assert_eq!(args.config, Some(PathBuf::from("custom-config.toml")));
}

#[test]
fn test_cli_rejects_non_numeric_limits() {
    assert!(Args::try_parse_from(["vibebench", "--memory-mb", "lots"]).is_err());
}

#[test]
fn test_markdown_report_through_command() {
    let dataset = tempdir().unwrap();
    fs::create_dir(dataset.path().join("gpt")).unwrap();
    fs::write(
        dataset.path().join("gpt/todo.py"),
        "def f():\n    # TODO: implement\n    pass\n",
    )
    .unwrap();

    let out_dir = tempdir().unwrap();
    let report = out_dir.path().join("VibeBench_Report.md");

    let args = Args::parse_from([
        "vibebench",
        "--path",
        dataset.path().to_str().unwrap(),
        "--skip-execution",
        "--output",
        "markdown",
        "--output-file",
        report.to_str().unwrap(),
        "--quiet",
    ]);
    assert_eq!(BenchCommand::from_args(args).run(), 0);

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("| todo.py | gpt | 1.00 | 0.00% | 1 | Skipped | N/A |"));
}

#[test]
fn test_binary_exit_code_for_bad_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "timeout_secs = \"soon\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vibebench"))
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CRITICAL"));
}
