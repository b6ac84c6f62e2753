//! Command implementations

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::BenchRunner;
use crate::error::{ErrorSeverity, Result};
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Benchmark the dataset described by the arguments
    Analyze(Args),
    /// Write a default configuration file to the given path
    Init(PathBuf),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init(PathBuf::from(DEFAULT_CONFIG_FILE));
        }
        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => analyze(args),
            Command::Init(path) => init(path),
        }
    }

    /// Run the command and map any error to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                if let Some(suggestion) = err.suggestion() {
                    eprintln!("Suggestion: {}", suggestion);
                }
                exit_code(err.severity())
            }
        }
    }
}

/// Exit code for an error of the given severity
pub fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

fn analyze(args: &Args) -> Result<()> {
    let settings = config::load_config(CliArgs::from(args))?;
    debug!(?settings, "resolved settings");

    if !settings.quiet {
        eprintln!(
            "VibeBench v{} - benchmarking {}",
            crate::VERSION,
            settings.dataset_path.display()
        );
        if settings.skip_execution {
            eprintln!("Execution skipped: static analysis only");
        }
    }

    let reporter = Arc::new(if settings.show_progress && !settings.quiet {
        ProgressReporter::new(false, settings.verbose)
    } else {
        ProgressReporter::hidden()
    });

    let runner = BenchRunner::new(settings.clone())?;
    reporter.start(0, "Benchmarking");
    let results = runner.run_with_progress(create_progress_callback(reporter.clone()))?;
    reporter.finish(&format!("Benchmarked {} files", results.summary.total_files));

    let formatter = create_formatter(
        &settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    );
    let content = formatter.format(&results)?;
    create_writer(settings.output_file.as_ref()).write(&content)?;

    if let Some(path) = &settings.output_file {
        if !settings.quiet {
            eprintln!("Report saved: {}", path.display());
        }
    }

    Ok(())
}

fn init(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    config::create_default_config(path)?;

    println!("Created default configuration file at: {}", path.display());
    println!("\nEvery setting is commented out; uncomment the ones you want to change:");
    println!("  - dataset_path: Directory holding one folder per model");
    println!("  - interpreter: Program used to run each file");
    println!("  - cpu_seconds / memory_mb / timeout_secs: Sandbox limits per file");
    println!("  - output_format: text, json, markdown or csv");
    Ok(())
}
