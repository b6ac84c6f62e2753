//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::record::BenchmarkResults;

/// Trait for different output formatters
pub trait Formatter {
    /// Format benchmark results into a string
    fn format(&self, results: &BenchmarkResults) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, results: &BenchmarkResults) -> Result<String> {
        // Quiet mode keeps a single summary line
        if self.quiet {
            let summary = &results.summary;
            let mut output = format!(
                "Total: {}, Success: {}, Runtime errors: {}, Timeouts: {}, Parse failures: {}\n",
                summary.total_files,
                summary.successes,
                summary.runtime_errors,
                summary.timeouts,
                summary.parse_failures,
            );
            if summary.credential_alerts > 0 {
                output.push_str(&format!("Credential alerts: {}\n", summary.credential_alerts));
            }
            return Ok(output);
        }

        Ok(formatters::format_results_text(
            results,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, results: &BenchmarkResults) -> Result<String> {
        formatters::format_results_json(results)
    }
}

/// Markdown report formatter
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format(&self, results: &BenchmarkResults) -> Result<String> {
        Ok(formatters::format_results_markdown(results))
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, results: &BenchmarkResults) -> Result<String> {
        formatters::format_results_csv(results)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: &OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
