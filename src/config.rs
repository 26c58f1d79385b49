//! Configuration management for h.
//!
//! Paths are resolved once at startup from the home directory. Optional
//! settings are loaded from `~/.h-data/config.toml`, with environment
//! variables taking precedence.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = ".h-data";
const LATEST_FILE_NAME: &str = "latest.json";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings that may be stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// OpenAI API key (prefer OPENAI_API_KEY env var).
    #[serde(default)]
    pub api_key: Option<String>,
    /// OpenAI API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sampling temperature passed to the API when set.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Runtime configuration, built once and passed to every component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the conversation cache and archived prompts.
    pub data_dir: PathBuf,
    /// Program used to compose prompts.
    pub editor: String,
    /// OpenAI API key, if one was found.
    pub api_key: Option<String>,
    /// OpenAI API base URL.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl Config {
    /// Build the configuration from the home directory, `config.toml` and
    /// the process environment.
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        let data_dir = home.join(DATA_DIR_NAME);
        let file = FileConfig::load(&data_dir.join(CONFIG_FILE_NAME))?;

        Ok(Self::from_parts(data_dir, file, |key| std::env::var(key).ok()))
    }

    /// Assemble a configuration, with `env` overriding values from the file.
    pub fn from_parts<F>(data_dir: PathBuf, file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

        Self {
            data_dir,
            editor: non_empty("EDITOR").unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            api_key: non_empty("OPENAI_API_KEY").or(file.api_key),
            base_url: non_empty("OPENAI_BASE_URL")
                .or(file.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: file.temperature,
        }
    }

    /// Path of the latest-conversation cache file.
    pub fn latest_path(&self) -> PathBuf {
        self.data_dir.join(LATEST_FILE_NAME)
    }
}

impl FileConfig {
    /// Load settings from `path`, using defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::io(path, e)),
        };

        toml::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_parts(
            PathBuf::from("/home/u/.h-data"),
            FileConfig::default(),
            env_from(&[]),
        );
        assert_eq!(config.editor, "vi");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert!(config.api_key.is_none());
        assert_eq!(
            config.latest_path(),
            PathBuf::from("/home/u/.h-data/latest.json")
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            api_key: Some("from-file".to_string()),
            base_url: Some("http://file.local".to_string()),
            temperature: Some(0.2),
        };
        let config = Config::from_parts(
            PathBuf::from("/tmp"),
            file,
            env_from(&[("OPENAI_API_KEY", "from-env"), ("EDITOR", "nano")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, "http://file.local");
        assert_eq!(config.editor, "nano");
        assert_eq!(config.temperature, Some(0.2));
    }

    #[test]
    fn test_empty_editor_falls_back_to_vi() {
        let config = Config::from_parts(
            PathBuf::from("/tmp"),
            FileConfig::default(),
            env_from(&[("EDITOR", "")]),
        );
        assert_eq!(config.editor, "vi");
    }

    #[test]
    fn test_file_config_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn test_file_config_deserialization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
api_key = "sk-test"
temperature = 0.5
"#,
        )
        .unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.api_key.as_deref(), Some("sk-test"));
        assert_eq!(file.temperature, Some(0.5));
        assert!(file.base_url.is_none());
    }

    #[test]
    fn test_file_config_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = [").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
