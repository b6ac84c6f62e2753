//! Sandboxed execution data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-child resource ceilings, applied identically to every run of an executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// CPU-time ceiling in seconds (RLIMIT_CPU)
    pub cpu_seconds: u64,
    /// Address-space ceiling in bytes (RLIMIT_AS)
    pub memory_bytes: u64,
}

impl ResourceLimits {
    pub const DEFAULT_CPU_SECONDS: u64 = 5;
    pub const DEFAULT_MEMORY_BYTES: u64 = 512 * 1024 * 1024;

    /// Build limits, rejecting zero ceilings
    pub fn new(cpu_seconds: u64, memory_bytes: u64) -> Option<Self> {
        if cpu_seconds == 0 || memory_bytes == 0 {
            return None;
        }
        Some(Self {
            cpu_seconds,
            memory_bytes,
        })
    }

    /// Build limits from a megabyte figure as used in configuration
    pub fn from_megabytes(cpu_seconds: u64, memory_mb: u64) -> Option<Self> {
        Self::new(cpu_seconds, memory_mb.checked_mul(1024 * 1024)?)
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_seconds: Self::DEFAULT_CPU_SECONDS,
            memory_bytes: Self::DEFAULT_MEMORY_BYTES,
        }
    }
}

/// Tag of an execution outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    RuntimeError,
    Timeout,
    InfrastructureError,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Success => write!(f, "Success"),
            ExecutionStatus::RuntimeError => write!(f, "Runtime Error"),
            ExecutionStatus::Timeout => write!(f, "Timeout"),
            ExecutionStatus::InfrastructureError => write!(f, "Infrastructure Error"),
        }
    }
}

/// Outcome of running one file in the sandbox. Exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// Exited with status zero
    Success {
        duration_secs: f64,
        stdout_preview: String,
        stderr: String,
    },
    /// Ran to completion with a nonzero status or was killed by a signal
    /// (including a resource-ceiling signal)
    RuntimeError {
        duration_secs: f64,
        exit_code: Option<i32>,
        signal: Option<i32>,
        stdout_preview: String,
        stderr: String,
    },
    /// Exceeded the wall-clock budget and was terminated
    Timeout {
        message: String,
        stdout_preview: String,
        stderr: String,
    },
    /// The harness could not run the file at all
    InfrastructureError { message: String },
}

impl ExecutionOutcome {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ExecutionOutcome::InfrastructureError {
            message: message.into(),
        }
    }

    pub fn status(&self) -> ExecutionStatus {
        match self {
            ExecutionOutcome::Success { .. } => ExecutionStatus::Success,
            ExecutionOutcome::RuntimeError { .. } => ExecutionStatus::RuntimeError,
            ExecutionOutcome::Timeout { .. } => ExecutionStatus::Timeout,
            ExecutionOutcome::InfrastructureError { .. } => ExecutionStatus::InfrastructureError,
        }
    }

    /// Wall-clock duration, absent when no meaningful measurement exists
    pub fn duration_secs(&self) -> Option<f64> {
        match self {
            ExecutionOutcome::Success { duration_secs, .. }
            | ExecutionOutcome::RuntimeError { duration_secs, .. } => Some(*duration_secs),
            ExecutionOutcome::Timeout { .. } | ExecutionOutcome::InfrastructureError { .. } => None,
        }
    }

    pub fn stdout_preview(&self) -> &str {
        match self {
            ExecutionOutcome::Success { stdout_preview, .. }
            | ExecutionOutcome::RuntimeError { stdout_preview, .. }
            | ExecutionOutcome::Timeout { stdout_preview, .. } => stdout_preview,
            ExecutionOutcome::InfrastructureError { .. } => "",
        }
    }

    pub fn stderr(&self) -> &str {
        match self {
            ExecutionOutcome::Success { stderr, .. }
            | ExecutionOutcome::RuntimeError { stderr, .. }
            | ExecutionOutcome::Timeout { stderr, .. } => stderr,
            ExecutionOutcome::InfrastructureError { .. } => "",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ExecutionOutcome::Timeout { message, .. }
            | ExecutionOutcome::InfrastructureError { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ExecutionStatus::Success
    }
}
