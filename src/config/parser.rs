//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};
use crate::models::config::PartialSettings;

use super::file::DEFAULT_CONFIG_FILE;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BenchError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| BenchError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn invalid(path: &Path, what: impl std::fmt::Display) -> BenchError {
    BenchError::config_error(format!("{} in config file: {}", what, path.display()))
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(dataset_path) = &settings.dataset_path {
        if dataset_path.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty dataset_path"));
        }
    }

    if let Some(interpreter) = &settings.interpreter {
        if interpreter.trim().is_empty() {
            return Err(invalid(path, "Invalid empty interpreter"));
        }
    }

    if let Some(extensions) = &settings.extensions {
        if extensions.is_empty() || extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(invalid(path, "Invalid extensions list"));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid(path, "Empty exclude pattern"));
            }
            glob::Pattern::new(pattern)
                .map_err(|e| invalid(path, format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    for (name, value) in [
        ("cpu_seconds", settings.cpu_seconds),
        ("memory_mb", settings.memory_mb),
        ("timeout_secs", settings.timeout_secs),
    ] {
        if value == Some(0) {
            return Err(invalid(path, format!("Invalid {} 0. Must be at least 1.", name)));
        }
    }

    if settings.jobs == Some(0) {
        return Err(invalid(path, "Invalid jobs 0. Must be at least 1."));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty output_file"));
        }
    }

    Ok(())
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.exists() {
        return Ok(Some(parse_config_file(current_dir_config)?));
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(DEFAULT_CONFIG_FILE);
        if home_config.exists() {
            return Ok(Some(parse_config_file(home_config)?));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("vibebench").join("config.toml");
        if xdg_config.exists() {
            return Ok(Some(parse_config_file(xdg_config)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(BenchError::io_error)?;
        }
    }

    fs::write(path, include_str!("default_config.toml")).map_err(BenchError::io_error)?;

    Ok(())
}
