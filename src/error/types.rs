//! Error types and definitions for VibeBench
//!
//! Only harness problems live here: configuration, reading sources, writing
//! reports, building the worker pool. A source file that fails to parse or a
//! child process that crashes is an analysis *result*, not a `BenchError`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for VibeBench operations
#[derive(Debug, Error)]
pub enum BenchError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A source file under analysis could not be read
    #[error("Error reading source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// Worker pool construction or execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV buffer was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl BenchError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BenchError::PermissionDenied { .. } => ErrorSeverity::Warning,
            BenchError::SourceRead { .. } => ErrorSeverity::Warning,

            BenchError::Config { .. } => ErrorSeverity::Critical,
            BenchError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            BenchError::ConfigRead { .. } => ErrorSeverity::Critical,
            BenchError::ConfigParse { .. } => ErrorSeverity::Critical,
            BenchError::StdoutWrite { .. } => ErrorSeverity::Critical,
            BenchError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BenchError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            BenchError::SourceRead { path, source } => {
                format!("Could not read '{}': {}. The file is reported without analysis.", path.display(), source)
            }
            BenchError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            BenchError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing dataset directory.", path.display())
            }
            BenchError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Run `vibebench --init` or use command line options.", path.display())
            }
            BenchError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Suggested remedy shown after the message, when one exists
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            BenchError::InvalidPath { .. } => Some("Check that the dataset path exists and is accessible"),
            BenchError::ConfigNotFound { .. } => Some("Create a .vibebench.toml file with --init or pass --config"),
            BenchError::ConfigParse { .. } => Some("Compare your config file against the one written by --init"),
            BenchError::PermissionDenied { .. } => Some("Check file permissions on the dataset"),
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        BenchError::Io { source }
    }

    /// Create a source read error for a file under analysis
    pub fn source_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::SourceRead {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        BenchError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        BenchError::PermissionDenied { path: path.into() }
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::io_error(err)
    }
}

impl From<glob::PatternError> for BenchError {
    fn from(err: glob::PatternError) -> Self {
        BenchError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::JsonSerialize { source: err }
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        BenchError::Csv { source: err }
    }
}

impl From<rayon::ThreadPoolBuildError> for BenchError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        BenchError::ParallelExecution {
            message: err.to_string(),
        }
    }
}

/// Result type alias for VibeBench operations
pub type Result<T> = std::result::Result<T, BenchError>;
