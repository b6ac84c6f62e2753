//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// VibeBench - static and sandboxed dynamic evaluation of generated Python code
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "vibebench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benchmark model-generated Python files with static analysis and sandboxed execution")]
#[command(long_about = "VibeBench walks a dataset directory holding one folder per model, parses every \
Python file to measure complexity, vocabulary, documentation coverage and suspicious patterns, then \
runs each file in a child process under CPU-time, memory and wall-clock limits. Results are reported \
per file and summarized per run.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Benchmark ./datasets
    vibebench

    # Benchmark a specific dataset directory
    vibebench --path ./my-datasets

    # Static analysis only, never execute the files
    vibebench --skip-execution

Sandbox Limits:
    # Tighter limits for untrusted samples
    vibebench --cpu-seconds 2 --memory-mb 256 --timeout 3

    # Use a specific interpreter
    vibebench --interpreter /usr/bin/python3.12

    # Run four files at a time
    vibebench --jobs 4

Output Options:
    # Markdown report written to a file
    vibebench --output markdown --output-file benchmark_report.md

    # JSON for further processing
    vibebench --output json --output-file results.json

    # Disable colored output and progress bars
    vibebench --no-colors --no-progress

Configuration:
    # Use a specific configuration file
    vibebench --config ./vibebench.toml

    # Create a default configuration file
    vibebench --init
")]
pub struct Args {
    /// Dataset directory
    #[arg(short, long, value_name = "PATH", help = "Dataset directory holding one folder per model (defaults to ./datasets)")]
    pub path: Option<PathBuf>,

    /// Exclude files matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for files to skip (can be specified multiple times, e.g., --exclude '**/drafts/**')")]
    pub exclude: Vec<String>,

    /// Folder holding the human-written reference samples
    #[arg(long, value_name = "DIR", help = "Dataset folder whose files are the benchmark reference (default: human_samples)")]
    pub baseline_dir: Option<String>,

    /// Interpreter used to run each file
    #[arg(long, value_name = "PROGRAM", help = "Interpreter executable used to run each file (default: python3)")]
    pub interpreter: Option<String>,

    /// CPU-time ceiling per file
    #[arg(long, value_name = "SECONDS", help = "CPU-time ceiling for each child process (default: 5)")]
    pub cpu_seconds: Option<u64>,

    /// Address-space ceiling per file
    #[arg(long, value_name = "MB", help = "Address-space ceiling for each child process in megabytes (default: 512)")]
    pub memory_mb: Option<u64>,

    /// Wall-clock timeout per file
    #[arg(short, long, value_name = "SECONDS", help = "Wall-clock timeout for each child process (default: 5)")]
    pub timeout: Option<u64>,

    /// Number of files processed at once
    #[arg(short, long, value_name = "N", help = "Number of files analyzed and executed concurrently (defaults to the number of CPUs)")]
    pub jobs: Option<usize>,

    /// Skip execution
    #[arg(long, help = "Only run static analysis; never spawn a child process")]
    pub skip_execution: bool,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Output format: 'text' for a terminal summary, 'json' for machine processing, 'markdown' for a report, 'csv' for spreadsheets")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified, e.g., --output-file ./benchmark_report.md)")]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results, no progress or startup information)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and log per-file events")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .vibebench.toml in current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.vibebench.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Markdown report
    Markdown,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
