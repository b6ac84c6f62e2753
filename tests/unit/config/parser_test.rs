use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use vibebench::{
    config::parser::{create_default_config, parse_config_content, parse_config_file, validate_partial_settings},
    error::{BenchError, Result},
    models::config::{OutputFormat, PartialSettings},
};

const CONFIG: &str = r#"
    dataset_path = "/data/benchmarks"
    exclude_patterns = ["**/drafts/**", "**/old/**"]
    interpreter = "python3.12"
    cpu_seconds = 3
    memory_mb = 256
    timeout_secs = 8
    output_format = "markdown"
    skip_execution = false
"#;

#[test]
fn test_parse_config_content() -> Result<()> {
    let settings = parse_config_content(CONFIG, "virtual_path.toml")?;

    assert_eq!(settings.dataset_path, Some(PathBuf::from("/data/benchmarks")));
    assert_eq!(
        settings.exclude_patterns,
        Some(vec!["**/drafts/**".to_string(), "**/old/**".to_string()])
    );
    assert_eq!(settings.interpreter.as_deref(), Some("python3.12"));
    assert_eq!(settings.cpu_seconds, Some(3));
    assert_eq!(settings.memory_mb, Some(256));
    assert_eq!(settings.timeout_secs, Some(8));
    assert_eq!(settings.output_format, Some(OutputFormat::Markdown));
    assert_eq!(settings.skip_execution, Some(false));
    assert_eq!(settings.jobs, None);

    Ok(())
}

#[test]
fn test_parse_config_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("test_config.toml");
    fs::write(&config_path, CONFIG)?;

    let settings = parse_config_file(&config_path)?;
    assert_eq!(settings.timeout_secs, Some(8));

    Ok(())
}

#[test]
fn test_parse_config_file_not_found() {
    let result = parse_config_file("/nonexistent/path/config.toml");
    assert!(matches!(result, Err(BenchError::ConfigNotFound { .. })));
}

#[test]
fn test_unknown_key_is_rejected() {
    let result = parse_config_content("max_depth = 3\n", "virtual_path.toml");
    assert!(matches!(result, Err(BenchError::ConfigParse { .. })));
}

#[test]
fn test_validate_partial_settings() {
    let valid = PartialSettings {
        cpu_seconds: Some(1),
        jobs: Some(8),
        ..Default::default()
    };
    assert!(validate_partial_settings(&valid, "virtual_path.toml").is_ok());

    for invalid in [
        PartialSettings {
            memory_mb: Some(0),
            ..Default::default()
        },
        PartialSettings {
            jobs: Some(0),
            ..Default::default()
        },
        PartialSettings {
            interpreter: Some("  ".to_string()),
            ..Default::default()
        },
        PartialSettings {
            extensions: Some(vec![]),
            ..Default::default()
        },
        PartialSettings {
            exclude_patterns: Some(vec!["[".to_string()]),
            ..Default::default()
        },
    ] {
        assert!(
            matches!(
                validate_partial_settings(&invalid, "virtual_path.toml"),
                Err(BenchError::Config { .. })
            ),
            "accepted {:?}",
            invalid
        );
    }
}

#[test]
fn test_create_default_config() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("nested").join(".vibebench.toml");

    create_default_config(&config_path)?;
    assert!(config_path.exists());

    // every key is commented out, so the template parses to nothing
    let settings = parse_config_file(&config_path)?;
    assert_eq!(settings, PartialSettings::default());

    Ok(())
}
