use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ExtractError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "patent_grants.toml";
pub const CONFIG_PATH_ENV: &str = "PATENT_GRANTS_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_name: String,
    /// Used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "patent_grants.log".to_string(),
            default_filter: "patent_grants=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-printed JSON array instead of JSON lines.
    pub pretty: bool,
}

impl Config {
    /// Load from `path`, else `$PATENT_GRANTS_CONFIG`, else `patent_grants.toml`.
    ///
    /// An explicitly named file must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let config_path = match explicit {
            Some(p) => p,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                    return Ok(Self::default());
                }
                default
            }
        };

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ExtractError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.logging.file_name.trim().is_empty() {
            return Err(ExtractError::Config("logging.file_name must not be empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
        assert_eq!(config.logging.default_filter, "patent_grants=info");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = Config::from_toml_str("[output]\npretty = true\n[logging]\ndirectory = \"/var/log/pg\"\n").unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/pg"));
        assert_eq!(config.logging.file_name, "patent_grants.log");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            Config::from_toml_str("[output]\npretty = \"yes\"\n"),
            Err(ExtractError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[logging]\nfile_name = \" \"\n"),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\ndefault_filter = \"patent_grants=debug\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.default_filter, "patent_grants=debug");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(missing.as_path())),
            Err(ExtractError::Config(_))
        ));
    }
}
