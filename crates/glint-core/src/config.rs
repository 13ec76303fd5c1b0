//! Configuration management for Glint.
//!
//! Loads configuration from ${GLINT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model for text-only requests.
    pub model: String,

    /// Model for requests with an image attachment.
    pub vision_model: String,

    /// Maximum tokens for responses (optional)
    pub max_output_tokens: Option<u32>,

    /// Override for the API base URL.
    pub base_url: Option<String>,

    /// API key; falls back to the GEMINI_API_KEY environment variable.
    pub api_key: Option<String>,
}

impl Config {
    const DEFAULT_MODEL: &str = "gemini-pro";
    const DEFAULT_VISION_MODEL: &str = "gemini-pro-vision";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            vision_model: Self::DEFAULT_VISION_MODEL.to_string(),
            max_output_tokens: None,
            base_url: None,
            api_key: None,
        }
    }
}

pub mod paths {
    //! Path resolution for Glint configuration.
    //!
    //! GLINT_HOME resolution order:
    //! 1. GLINT_HOME environment variable (if set)
    //! 2. ~/.config/glint (default)

    use std::path::PathBuf;

    /// Returns the Glint home directory.
    pub fn glint_home() -> PathBuf {
        if let Ok(home) = std::env::var("GLINT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("glint"))
            .unwrap_or_else(|| PathBuf::from(".glint"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        glint_home().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.vision_model, "gemini-pro-vision");
        assert_eq!(config.max_output_tokens, None);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "model = \"gemini-1.5-flash\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.vision_model, "gemini-pro-vision");
    }

    /// Config loading: malformed TOML is an error, not a silent default.
    #[test]
    fn test_load_malformed_config_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "model = [not toml").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }
}
