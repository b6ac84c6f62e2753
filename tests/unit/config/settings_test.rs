use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use vibebench::{
    config::SettingsValidator,
    error::{BenchError, Result},
    models::config::{OutputFormat, PartialSettings, Settings},
};

#[test]
fn test_partial_settings_merge() -> Result<()> {
    let mut base = PartialSettings {
        dataset_path: Some(PathBuf::from("/base/datasets")),
        exclude_patterns: Some(vec!["**/drafts/**".to_string()]),
        cpu_seconds: Some(2),
        output_format: Some(OutputFormat::Text),
        ..Default::default()
    };

    let override_settings = PartialSettings {
        dataset_path: Some(PathBuf::from("/override/datasets")),
        exclude_patterns: Some(vec!["**/old/**".to_string(), "**/tmp/**".to_string()]),
        output_format: Some(OutputFormat::Markdown),
        skip_execution: Some(true),
        ..Default::default()
    };

    base.merge_from(override_settings);

    assert_eq!(base.dataset_path, Some(PathBuf::from("/override/datasets")));
    assert_eq!(
        base.exclude_patterns,
        Some(vec!["**/old/**".to_string(), "**/tmp/**".to_string()])
    );
    // untouched by the override
    assert_eq!(base.cpu_seconds, Some(2));
    assert_eq!(base.output_format, Some(OutputFormat::Markdown));
    assert_eq!(base.skip_execution, Some(true));

    Ok(())
}

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.dataset_path, PathBuf::from("datasets"));
    assert_eq!(settings.interpreter, "python3");
    assert_eq!(settings.extensions, vec!["py".to_string()]);
    assert!(settings.exclude_patterns.contains(&"**/__pycache__/**".to_string()));
    assert_eq!(settings.baseline_dir, "human_samples");
    assert_eq!(settings.cpu_seconds, 5);
    assert_eq!(settings.memory_mb, 512);
    assert_eq!(settings.timeout(), Duration::from_secs(5));
    assert_eq!(settings.stdout_preview_bytes, 100);
    assert!(settings.jobs >= 1);
    assert!(!settings.skip_execution);
    assert_eq!(settings.output_format, OutputFormat::Text);
    assert!(settings.use_colors);
    assert!(settings.show_progress);

    let limits = settings.resource_limits().unwrap();
    assert_eq!(limits.cpu_seconds, 5);
    assert_eq!(limits.memory_bytes, 512 * 1024 * 1024);
}

#[test]
fn test_validator_accepts_existing_dataset() -> Result<()> {
    let dataset = tempdir()?;
    let settings = Settings {
        dataset_path: dataset.path().to_path_buf(),
        output_file: Some(dataset.path().join("report.md")),
        ..Settings::default()
    };
    SettingsValidator::validate(&settings)
}

#[test]
fn test_validator_rejections() {
    let dataset = tempdir().unwrap();
    let valid = Settings {
        dataset_path: dataset.path().to_path_buf(),
        ..Settings::default()
    };

    let missing = Settings {
        dataset_path: PathBuf::from("/nonexistent/datasets"),
        ..valid.clone()
    };
    assert!(matches!(
        SettingsValidator::validate(&missing),
        Err(BenchError::InvalidPath { .. })
    ));

    let zero_timeout = Settings {
        timeout_secs: 0,
        ..valid.clone()
    };
    assert!(SettingsValidator::validate(&zero_timeout).is_err());

    let huge_memory = Settings {
        memory_mb: u64::MAX,
        ..valid.clone()
    };
    assert!(SettingsValidator::validate(&huge_memory).is_err());

    let bad_glob = Settings {
        exclude_patterns: vec!["[".to_string()],
        ..valid.clone()
    };
    assert!(matches!(
        SettingsValidator::validate(&bad_glob),
        Err(BenchError::Config { ref message }) if message.starts_with("Invalid exclude pattern: [")
    ));

    let no_output_dir = Settings {
        output_file: Some(PathBuf::from("/nonexistent/dir/report.json")),
        ..valid
    };
    assert!(matches!(
        SettingsValidator::validate(&no_output_dir),
        Err(BenchError::OutputDirectoryNotFound { .. })
    ));
}

#[test]
fn test_output_format_from_str() {
    assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
    assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
    assert!(matches!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown)));
    assert!(matches!("Markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown)));
    assert!(matches!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv)));
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_output_format_display() {
    assert_eq!(OutputFormat::Text.to_string(), "text");
    assert_eq!(OutputFormat::Json.to_string(), "json");
    assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    assert_eq!(OutputFormat::Csv.to_string(), "csv");
}
