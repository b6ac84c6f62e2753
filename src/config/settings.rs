//! Validation of fully merged settings

use std::path::Path;

use crate::error::{BenchError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.dataset_path.is_dir() {
            return Err(BenchError::InvalidPath {
                path: settings.dataset_path.clone(),
            });
        }

        if settings.interpreter.trim().is_empty() {
            return Err(BenchError::config_error("Interpreter must not be empty"));
        }

        if settings.extensions.is_empty() {
            return Err(BenchError::config_error(
                "At least one source extension is required",
            ));
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.cpu_seconds == 0 {
            return Err(BenchError::config_error("cpu_seconds must be at least 1"));
        }
        if settings.memory_mb == 0 {
            return Err(BenchError::config_error("memory_mb must be at least 1"));
        }
        if settings.resource_limits().is_none() {
            return Err(BenchError::config_error(format!(
                "memory_mb {} is too large",
                settings.memory_mb
            )));
        }
        if settings.timeout_secs == 0 {
            return Err(BenchError::config_error("timeout_secs must be at least 1"));
        }
        if settings.jobs == 0 {
            return Err(BenchError::config_error("jobs must be at least 1"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path's directory exists and is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        if !parent.exists() {
            return Err(BenchError::OutputDirectoryNotFound {
                path: parent.to_path_buf(),
            });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(parent).map_err(BenchError::io_error)?;
            if metadata.permissions().mode() & 0o200 == 0 {
                return Err(BenchError::permission_denied(parent));
            }
        }

        Ok(())
    }
}
