//! Progress reporting functionality
//!
//! Progress is drawn on stderr so it never mixes with a report written to
//! stdout.

use crate::core::discovery::BenchTarget;
use crate::core::parallel::ProgressUpdate;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {wide_msg}";

/// Progress reporter for a benchmark run
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new progress reporter. No bar is drawn in quiet mode.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let bar = (!quiet).then(|| {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            bar.set_style(
                ProgressStyle::with_template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar
        });

        Self {
            quiet,
            verbose,
            bar,
        }
    }

    /// Hidden reporter, used when progress is disabled
    pub fn hidden() -> Self {
        Self {
            quiet: true,
            verbose: false,
            bar: None,
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }
    }

    /// Record one completed file
    pub fn update(&self, progress: &ProgressUpdate, target: &BenchTarget) {
        let Some(bar) = &self.bar else {
            return;
        };

        bar.set_length(progress.total as u64);
        bar.set_position(progress.current as u64);
        bar.set_message(format!("{}/{}", target.model, target.file));

        if self.verbose {
            bar.println(format!(
                "[{}/{}] {}",
                progress.current,
                progress.total,
                target.path.display()
            ));
        }
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Position of the bar, if one is drawn
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(|bar| bar.position())
    }
}

/// Create a progress callback that updates a ProgressReporter
pub fn create_progress_callback(
    reporter: Arc<ProgressReporter>,
) -> impl Fn(ProgressUpdate, &BenchTarget) + Send + Sync {
    move |progress: ProgressUpdate, target: &BenchTarget| {
        reporter.update(&progress, target);
    }
}
