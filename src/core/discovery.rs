//! Dataset discovery
//!
//! A dataset is a directory with one sub-folder per model. Every source file
//! below it becomes a benchmark target labelled with its parent folder name.

use crate::error::{BenchError, Result};
use crate::models::config::Settings;
use crate::models::record::Category;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Label for files placed directly in the dataset root
pub const ROOT_MODEL_LABEL: &str = "root";

/// One source file to analyze and execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchTarget {
    pub path: PathBuf,
    pub model: String,
    pub category: Category,
    pub file: String,
}

/// Finds benchmark targets below a dataset directory
#[derive(Debug, Clone)]
pub struct DatasetScanner {
    root: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
    baseline_dir: String,
}

impl DatasetScanner {
    pub fn new(
        root: impl Into<PathBuf>,
        extensions: &[String],
        exclude_patterns: &[String],
        baseline_dir: impl Into<String>,
    ) -> Result<Self> {
        let exclude = exclude_patterns
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            root: root.into(),
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            exclude,
            baseline_dir: baseline_dir.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.dataset_path,
            &settings.extensions,
            &settings.exclude_patterns,
            &settings.baseline_dir,
        )
    }

    /// All targets in path order. Unreadable directories are skipped with a
    /// warning; a missing root is an error.
    pub fn discover(&self) -> Result<Vec<BenchTarget>> {
        if !self.root.is_dir() {
            return Err(BenchError::InvalidPath {
                path: self.root.clone(),
            });
        }

        let mut targets = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    warn!(path = %path.display(), error = %err, "skipping unreadable dataset entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.has_source_extension(entry.path()) {
                continue;
            }
            if self.is_excluded(entry.path()) {
                debug!(path = %entry.path().display(), "excluded");
                continue;
            }
            targets.push(self.target(entry.path()));
        }

        debug!(count = targets.len(), root = %self.root.display(), "discovered targets");
        Ok(targets)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }

    fn target(&self, path: &Path) -> BenchTarget {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parent = relative.parent().filter(|p| !p.as_os_str().is_empty());

        let model = parent
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ROOT_MODEL_LABEL.to_string());

        let is_baseline = parent
            .map(|p| p.iter().any(|component| component == self.baseline_dir.as_str()))
            .unwrap_or(false);

        BenchTarget {
            path: path.to_path_buf(),
            model,
            category: if is_baseline {
                Category::BenchmarkReference
            } else {
                Category::AiSynthesis
            },
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}
