//! Sandboxed execution of source files
//!
//! Wraps [`ResourceLimitedRunner`] with the precondition check, timing and
//! normalization into exactly one [`ExecutionOutcome`] per run. Expected
//! failures never surface as `Err`.

use crate::core::runner::{ResourceLimitedRunner, RunOutcome};
use crate::error::{BenchError, OptionExt, Result};
use crate::models::analysis::round_to;
use crate::models::config::Settings;
use crate::models::execution::{ExecutionOutcome, ResourceLimits};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default number of stdout bytes kept in an outcome
pub const DEFAULT_STDOUT_PREVIEW_BYTES: usize = 100;

/// Executes source files through an injected interpreter under fixed limits
#[derive(Debug, Clone)]
pub struct SandboxedExecutor {
    interpreter: PathBuf,
    runner: ResourceLimitedRunner,
    stdout_preview_bytes: usize,
}

impl SandboxedExecutor {
    pub fn new(interpreter: impl Into<PathBuf>, limits: ResourceLimits, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            runner: ResourceLimitedRunner::new(limits, timeout)
                .with_stdout_limit(DEFAULT_STDOUT_PREVIEW_BYTES),
            stdout_preview_bytes: DEFAULT_STDOUT_PREVIEW_BYTES,
        }
    }

    pub fn with_stdout_preview_bytes(mut self, bytes: usize) -> Self {
        self.runner = self.runner.with_stdout_limit(bytes);
        self.stdout_preview_bytes = bytes;
        self
    }

    /// Build an executor from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let limits = settings.resource_limits().ok_or_error(|| {
            BenchError::config_error(format!(
                "Invalid resource limits: cpu_seconds={}, memory_mb={}",
                settings.cpu_seconds, settings.memory_mb
            ))
        })?;

        Ok(Self::new(&settings.interpreter, limits, settings.timeout())
            .with_stdout_preview_bytes(settings.stdout_preview_bytes))
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn limits(&self) -> ResourceLimits {
        self.runner.limits()
    }

    pub fn timeout(&self) -> Duration {
        self.runner.timeout()
    }

    /// Run `path` with the configured interpreter and classify the result
    pub fn run(&self, path: &Path) -> ExecutionOutcome {
        if !path.is_file() {
            warn!(path = %path.display(), "execution target missing");
            return ExecutionOutcome::infrastructure(format!(
                "File not found: {}",
                path.display()
            ));
        }

        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(path);

        let outcome = match self.runner.run(cmd) {
            Ok(RunOutcome::Completed {
                status,
                elapsed,
                stdout,
                stderr,
            }) => self.completed(status, elapsed, &stdout, &stderr),
            Ok(RunOutcome::TimedOut { stdout, stderr }) => ExecutionOutcome::Timeout {
                message: format!("Exceeded {}s", self.timeout().as_secs_f64()),
                stdout_preview: self.preview(&stdout),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            },
            Err(e) => {
                warn!(
                    path = %path.display(),
                    interpreter = %self.interpreter.display(),
                    error = %e,
                    "could not run child"
                );
                ExecutionOutcome::infrastructure(format!(
                    "Failed to run {}: {}",
                    self.interpreter.display(),
                    e
                ))
            }
        };

        info!(path = %path.display(), status = %outcome.status(), "execution finished");
        outcome
    }

    fn completed(
        &self,
        status: ExitStatus,
        elapsed: Duration,
        stdout: &[u8],
        stderr: &[u8],
    ) -> ExecutionOutcome {
        let duration_secs = round_to(elapsed.as_secs_f64(), 4);
        let stdout_preview = self.preview(stdout);
        let stderr = String::from_utf8_lossy(stderr).trim().to_string();

        if status.success() {
            return ExecutionOutcome::Success {
                duration_secs,
                stdout_preview,
                stderr,
            };
        }

        let signal = exit_signal(status);
        debug!(code = ?status.code(), ?signal, "child exited unsuccessfully");
        ExecutionOutcome::RuntimeError {
            duration_secs,
            exit_code: status.code(),
            signal,
            stdout_preview,
            stderr,
        }
    }

    /// First `stdout_preview_bytes` raw bytes, lossily decoded and trimmed.
    /// A character split by the cut is dropped.
    fn preview(&self, stdout: &[u8]) -> String {
        let end = char_boundary(stdout, stdout.len().min(self.stdout_preview_bytes));
        String::from_utf8_lossy(&stdout[..end]).trim().to_string()
    }
}

/// Back `end` off to the start of a UTF-8 sequence it would cut short
fn char_boundary(bytes: &[u8], end: usize) -> usize {
    let mut lead = end;
    while lead > 0 && end - lead < 3 && bytes[lead - 1] & 0xC0 == 0x80 {
        lead -= 1;
    }
    if lead == 0 {
        return end;
    }
    let lead = lead - 1;
    let width = match bytes[lead] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };
    if lead + width > end {
        lead
    } else {
        end
    }
}

#[cfg(unix)]
fn exit_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: ExitStatus) -> Option<i32> {
    None
}
