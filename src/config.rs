//! Configuration file schema for loopcheck.
//!
//! Configuration is optional; everything has a working default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["loopcheck.yaml", ".loopcheck.yaml"];

/// Port the analysis server listens on by default.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Language IDs the tool will analyze.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Port for `loopcheck serve`.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Discover a config file in the current directory, falling back to
    /// defaults when none exists.
    pub fn discover() -> anyhow::Result<Self> {
        for name in DEFAULT_CONFIG_NAMES {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::parse_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Whether a language ID is enabled.
    pub fn language_enabled(&self, lang_id: &str) -> bool {
        self.languages.iter().any(|l| l == lang_id)
    }
}

fn default_languages() -> Vec<String> {
    vec!["python".to_string(), "javascript".to_string()]
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.language_enabled("python"));
        assert!(config.language_enabled("javascript"));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config: Config = serde_yaml::from_str("languages:\n  - python\n").unwrap();
        assert!(config.language_enabled("python"));
        assert!(!config.language_enabled("javascript"));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loopcheck.yaml");
        std::fs::write(&path, "port: 4100\n").unwrap();

        let config = Config::parse_file(&path).unwrap();
        assert_eq!(config.port, 4100);
        assert!(config.language_enabled("python"));
    }
}
