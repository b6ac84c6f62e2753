//! File and environment configuration sources

use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{parser, ConfigSource};
use crate::error::{BenchError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".vibebench.toml";

/// Default prefix for environment variables
pub const DEFAULT_ENV_PREFIX: &str = "VIBEBENCH";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 10,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 10,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(BenchError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source.
///
/// Reads `<PREFIX>_<FIELD>` for every settings field, e.g.
/// `VIBEBENCH_TIMEOUT_SECS=10`. List fields are comma separated.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 20,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    fn var(&self, field: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, field))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn parsed<T: FromStr>(&self, field: &str) -> Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        match self.var(field) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|e: T::Err| {
                BenchError::config_error(format!(
                    "Invalid value '{}' for {}_{}: {}",
                    raw, self.prefix, field, e
                ))
            }),
        }
    }

    fn list(&self, field: &str) -> Option<Vec<String>> {
        self.var(field).map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(PartialSettings {
            dataset_path: self.var("DATASET_PATH").map(PathBuf::from),
            interpreter: self.var("INTERPRETER"),
            extensions: self.list("EXTENSIONS"),
            exclude_patterns: self.list("EXCLUDE"),
            baseline_dir: self.var("BASELINE_DIR"),
            cpu_seconds: self.parsed("CPU_SECONDS")?,
            memory_mb: self.parsed("MEMORY_MB")?,
            timeout_secs: self.parsed("TIMEOUT_SECS")?,
            stdout_preview_bytes: self.parsed("STDOUT_PREVIEW_BYTES")?,
            jobs: self.parsed("JOBS")?,
            skip_execution: self.parsed("SKIP_EXECUTION")?,
            output_format: self.parsed("OUTPUT_FORMAT")?,
            output_file: self.var("OUTPUT_FILE").map(PathBuf::from),
            quiet: self.parsed("QUIET")?,
            verbose: self.parsed("VERBOSE")?,
            use_colors: self.parsed("USE_COLORS")?,
            show_progress: self.parsed("SHOW_PROGRESS")?,
        })
    }

    fn is_available(&self) -> bool {
        let prefix = format!("{}_", self.prefix);
        std::env::vars_os().any(|(key, _)| {
            key.to_str()
                .map(|key| key.starts_with(&prefix))
                .unwrap_or(false)
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
