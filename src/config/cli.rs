//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line values relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub baseline_dir: Option<String>,
    pub interpreter: Option<String>,
    pub cpu_seconds: Option<u64>,
    pub memory_mb: Option<u64>,
    pub timeout: Option<u64>,
    pub jobs: Option<usize>,
    pub skip_execution: bool,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Markdown => OutputFormat::Markdown,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            path: args.path.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            baseline_dir: args.baseline_dir.clone(),
            interpreter: args.interpreter.clone(),
            cpu_seconds: args.cpu_seconds,
            memory_mb: args.memory_mb,
            timeout: args.timeout,
            jobs: args.jobs,
            skip_execution: args.skip_execution,
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // Flags only override when set, so a config file value survives an
        // absent flag.
        Ok(PartialSettings {
            dataset_path: args.path.clone(),
            interpreter: args.interpreter.clone(),
            extensions: None,
            exclude_patterns: args.exclude.clone(),
            baseline_dir: args.baseline_dir.clone(),
            cpu_seconds: args.cpu_seconds,
            memory_mb: args.memory_mb,
            timeout_secs: args.timeout,
            stdout_preview_bytes: None,
            jobs: args.jobs,
            skip_execution: args.skip_execution.then_some(true),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            quiet: args.quiet.then_some(true),
            verbose: args.verbose.then_some(true),
            use_colors: args.no_colors.then_some(false),
            show_progress: args.no_progress.then_some(false),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
