//! Configuration file support for dep-culprit.
//!
//! Provides YAML-based configuration through `dep-culprit.config.yml` files,
//! including data structures, file loading, and validation. Values from the
//! file sit between command-line flags and built-in defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::dto::OutputFormat;
use crate::culprit_analysis::domain::MatchMode;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dep-culprit.config.yml";

/// Upper bound on `max_retries`
const MAX_RETRIES_LIMIT: u32 = 10;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub snapshot: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub match_mode: Option<String>,
    pub go_binary: Option<PathBuf>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `match_mode`; invalid values are rejected at load time
    pub fn match_mode(&self) -> Option<MatchMode> {
        self.match_mode.as_deref().and_then(|m| m.parse().ok())
    }

    /// Parsed `format`; invalid values are rejected at load time
    pub fn format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(|f| f.parse().ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.concurrency == Some(0) {
        bail!(
            "Invalid config: concurrency must be greater than 0.\n\n\
             💡 Hint: Use a small positive number such as 8."
        );
    }

    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             💡 Hint: The timeout applies to each provider query, e.g. 60."
        );
    }

    if let Some(retries) = config.max_retries {
        if retries > MAX_RETRIES_LIMIT {
            bail!(
                "Invalid config: max_retries must be at most {} (got {}).",
                MAX_RETRIES_LIMIT,
                retries
            );
        }
    }

    if let Some(ref mode) = config.match_mode {
        if let Err(e) = mode.parse::<MatchMode>() {
            bail!("Invalid config: match_mode: {}", e);
        }
    }

    if let Some(ref format) = config.format {
        if let Err(e) = format.parse::<OutputFormat>() {
            bail!("Invalid config: format: {}", e);
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
snapshot: cache/graph.json
concurrency: 4
timeout_secs: 30
max_retries: 3
match_mode: substring
go_binary: /usr/local/go/bin/go
format: json
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("cache/graph.json")));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.max_retries, Some(3));
        assert_eq!(config.match_mode(), Some(MatchMode::Substring));
        assert_eq!(config.go_binary, Some(PathBuf::from("/usr/local/go/bin/go")));
        assert_eq!(config.format(), Some(OutputFormat::Json));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: text\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format(), Some(OutputFormat::Text));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "concurrency: 0\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("concurrency must be greater than 0"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "timeout_secs: 0\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "max_retries: 11\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("max_retries must be at most 10"));
    }

    #[test]
    fn test_unknown_match_mode_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "match_mode: regex\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("match_mode"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "format: markdown\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
format: json
unknown_field: true
another_unknown: value
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.snapshot.is_none());
        assert!(config.concurrency.is_none());
        assert!(config.match_mode().is_none());
        assert!(config.format().is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
