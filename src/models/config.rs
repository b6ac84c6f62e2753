//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::execution::ResourceLimits;

/// Main configuration settings for a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Dataset directory holding one sub-folder per model
    pub dataset_path: PathBuf,

    /// Interpreter used to execute each source file
    pub interpreter: String,

    /// File extensions (without the dot) treated as sources
    pub extensions: Vec<String>,

    /// Glob patterns to exclude from discovery
    pub exclude_patterns: Vec<String>,

    /// Dataset folder holding human-written reference samples
    pub baseline_dir: String,

    /// CPU-time ceiling per child, in seconds
    pub cpu_seconds: u64,

    /// Address-space ceiling per child, in megabytes
    pub memory_mb: u64,

    /// Wall-clock budget per child, in seconds
    pub timeout_secs: u64,

    /// Number of stdout bytes kept in each record
    pub stdout_preview_bytes: usize,

    /// Worker count (defaults to the number of CPUs)
    pub jobs: usize,

    /// Analyze only, never spawn a child
    pub skip_execution: bool,

    /// Output format (text, json, markdown, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Settings {
    /// Resource ceilings derived from `cpu_seconds` and `memory_mb`
    pub fn resource_limits(&self) -> Option<ResourceLimits> {
        ResourceLimits::from_megabytes(self.cpu_seconds, self.memory_mb)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("datasets"),
            interpreter: "python3".to_string(),
            extensions: vec!["py".to_string()],
            exclude_patterns: vec![
                "**/__pycache__/**".to_string(),
                "**/.venv/**".to_string(),
                "**/.git/**".to_string(),
            ],
            baseline_dir: "human_samples".to_string(),
            cpu_seconds: ResourceLimits::DEFAULT_CPU_SECONDS,
            memory_mb: ResourceLimits::DEFAULT_MEMORY_BYTES / (1024 * 1024),
            timeout_secs: 5,
            stdout_preview_bytes: 100,
            jobs: num_cpus::get(),
            skip_execution: false,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub dataset_path: Option<PathBuf>,
    pub interpreter: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub baseline_dir: Option<String>,
    pub cpu_seconds: Option<u64>,
    pub memory_mb: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub stdout_preview_bytes: Option<usize>,
    pub jobs: Option<usize>,
    pub skip_execution: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

/// Overwrite each `self` field with `other`'s when `other` has a value
macro_rules! merge_fields {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $self.$field = $other.$field;
            }
        )+
    };
}

impl PartialSettings {
    /// Merge another PartialSettings into this one.
    /// Fields from `other` take precedence over existing fields.
    pub fn merge_from(&mut self, other: PartialSettings) {
        merge_fields!(
            self,
            other,
            dataset_path,
            interpreter,
            extensions,
            exclude_patterns,
            baseline_dir,
            cpu_seconds,
            memory_mb,
            timeout_secs,
            stdout_preview_bytes,
            jobs,
            skip_execution,
            output_format,
            output_file,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings, using defaults for any
    /// fields that are None
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        let this = self.clone();

        Settings {
            dataset_path: this.dataset_path.unwrap_or(defaults.dataset_path),
            interpreter: this.interpreter.unwrap_or(defaults.interpreter),
            extensions: this.extensions.unwrap_or(defaults.extensions),
            exclude_patterns: this.exclude_patterns.unwrap_or(defaults.exclude_patterns),
            baseline_dir: this.baseline_dir.unwrap_or(defaults.baseline_dir),
            cpu_seconds: this.cpu_seconds.unwrap_or(defaults.cpu_seconds),
            memory_mb: this.memory_mb.unwrap_or(defaults.memory_mb),
            timeout_secs: this.timeout_secs.unwrap_or(defaults.timeout_secs),
            stdout_preview_bytes: this
                .stdout_preview_bytes
                .unwrap_or(defaults.stdout_preview_bytes),
            jobs: this.jobs.unwrap_or(defaults.jobs),
            skip_execution: this.skip_execution.unwrap_or(defaults.skip_execution),
            output_format: this.output_format.unwrap_or(defaults.output_format),
            output_file: this.output_file.or(defaults.output_file),
            quiet: this.quiet.unwrap_or(defaults.quiet),
            verbose: this.verbose.unwrap_or(defaults.verbose),
            use_colors: this.use_colors.unwrap_or(defaults.use_colors),
            show_progress: this.show_progress.unwrap_or(defaults.show_progress),
        }
    }
}
