use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stack_tool::DEFAULT_PROGRAM;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StacklineConfig {
    pub version: u32,
    pub tool: ToolConfig,
    pub watch: WatchConfig,
    pub pr_info: PrInfoConfig,
}

impl Default for StacklineConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tool: ToolConfig::default(),
            watch: WatchConfig::default(),
            pr_info: PrInfoConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolConfig {
    pub program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrInfoConfig {
    pub enabled: bool,
}

impl Default for PrInfoConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve home directory for config path")]
    HomeDirectoryUnavailable,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn resolve_config_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(base_dirs.home_dir().join(".config").join("stackline"))
}

pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    Ok(resolve_config_dir()?.join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<StacklineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: StacklineConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: &Path) -> Result<StacklineConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(StacklineConfig::default())
        }
        other => other,
    }
}

pub fn validate_config(config: &StacklineConfig) -> Result<(), ConfigError> {
    if config.version != 1 {
        return Err(ConfigError::Validation {
            message: "version must be 1".to_string(),
        });
    }

    if config.tool.program.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "tool.program must be non-empty".to_string(),
        });
    }

    if !(1..=MAX_DEBOUNCE_MS).contains(&config.watch.debounce_ms) {
        return Err(ConfigError::Validation {
            message: format!("watch.debounce_ms must be between 1 and {MAX_DEBOUNCE_MS}"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_config_from_toml(raw: &str) -> Result<StacklineConfig, ConfigError> {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        fs::write(file.path(), raw).expect("write temp config");
        load_config(file.path())
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = load_config_from_toml("").expect("defaults");
        assert_eq!(config, StacklineConfig::default());
        assert_eq!(config.tool.program, "gt");
        assert_eq!(config.watch.debounce_ms, 300);
        assert!(config.watch.enabled);
        assert!(config.pr_info.enabled);
    }

    #[test]
    fn accepts_full_config() {
        let raw = r#"
version = 1

[tool]
program = "/usr/local/bin/gt"

[watch]
enabled = false
debounce_ms = 500

[pr_info]
enabled = false
"#;

        let config = load_config_from_toml(raw).expect("valid config");
        assert_eq!(config.tool.program, "/usr/local/bin/gt");
        assert!(!config.watch.enabled);
        assert_eq!(config.watch.debounce_ms, 500);
        assert!(!config.pr_info.enabled);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = load_config_from_toml("[watch]\ndebounce_ms = 50\n").expect("partial");
        assert!(config.watch.enabled);
        assert_eq!(config.watch.debounce_ms, 50);
        assert_eq!(config.tool.program, "gt");
    }

    #[test]
    fn rejects_unknown_version() {
        let error = load_config_from_toml("version = 2\n").expect_err("version");
        assert!(error.to_string().contains("version must be 1"));
    }

    #[test]
    fn rejects_blank_program() {
        let error = load_config_from_toml("[tool]\nprogram = \"  \"\n").expect_err("program");
        assert!(error.to_string().contains("tool.program must be non-empty"));
    }

    #[test]
    fn rejects_out_of_range_debounce() {
        let zero = load_config_from_toml("[watch]\ndebounce_ms = 0\n").expect_err("zero");
        assert!(matches!(zero, ConfigError::Validation { .. }));

        let huge = load_config_from_toml("[watch]\ndebounce_ms = 60000\n").expect_err("huge");
        assert!(huge.to_string().contains("watch.debounce_ms"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let error = load_config_from_toml("version = \n").expect_err("parse");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config =
            load_config_or_default(&dir.path().join("config.toml")).expect("missing is ok");
        assert_eq!(config, StacklineConfig::default());
    }
}
