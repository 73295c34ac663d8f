//! Configuration management
//!
//! This module handles loading and saving `hookah.yml`.

use crate::Result;
use hookah_core::{Error, System};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file at the repository root
pub const CONFIG_FILE_NAME: &str = "hookah.yml";

/// Default hook source directory, relative to the repository root
pub const DEFAULT_SOURCE_DIR: &str = ".hookah";

/// Main configuration structure
///
/// ```yaml
/// source-dir: .hookah
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Directory holding one subdirectory per hook group.
    /// Relative paths are resolved against the repository root.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
        }
    }
}

impl Config {
    /// Load configuration from `hookah.yml` under `root`
    ///
    /// A missing file yields the defaults.
    pub fn load(system: &dyn System, root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !system.exists(&path) {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = system.read_file(&path)?;
        let content = String::from_utf8(content).map_err(|e| Error::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let config = Self::from_yaml_str(&content).map_err(|message| Error::ConfigParse {
            path: path.clone(),
            message,
        })?;
        tracing::debug!(path = %path.display(), source_dir = %config.source_dir.display(), "Loaded config");
        Ok(config)
    }

    /// Parse configuration from YAML text
    ///
    /// An empty document (or one holding only comments) yields the defaults.
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, String> {
        let is_blank = content
            .lines()
            .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'));
        if is_blank {
            return Ok(Self::default());
        }

        serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::Message(format!("Failed to serialize config: {e}")))
    }

    /// Write configuration to `hookah.yml` under `root`
    pub fn save(&self, system: &dyn System, root: &Path) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE_NAME);
        system.write_file(&path, self.to_yaml()?.as_bytes(), None)?;
        Ok(path)
    }

    /// Replace the source directory (command-line or environment override)
    #[must_use]
    pub fn with_source_dir(mut self, source_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = source_dir {
            self.source_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use hookah_core::MemorySystem;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.source_dir, PathBuf::from(".hookah"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let system = MemorySystem::new();
        let config = Config::load(&system, Path::new("/repo")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_source_dir() {
        let system = MemorySystem::new();
        system
            .write_file(
                Path::new("/repo/hookah.yml"),
                b"source-dir: tools/hooks\n",
                None,
            )
            .unwrap();

        let config = Config::load(&system, Path::new("/repo")).unwrap();
        assert_eq!(config.source_dir, PathBuf::from("tools/hooks"));
    }

    #[test]
    fn test_load_ignores_unknown_keys() {
        let config = Config::from_yaml_str("source-dir: .hooks\ncolor: true\n").unwrap();
        assert_eq!(config.source_dir, PathBuf::from(".hooks"));
    }

    #[test]
    fn test_load_empty_file() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(
            Config::from_yaml_str("# nothing yet\n\n").unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_load_missing_key_uses_default() {
        let config = Config::from_yaml_str("other: 1\n").unwrap();
        assert_eq!(config.source_dir, PathBuf::from(".hookah"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let system = MemorySystem::new();
        system
            .write_file(Path::new("/repo/hookah.yml"), b"source-dir: [unclosed\n", None)
            .unwrap();

        let err = Config::load(&system, Path::new("/repo")).unwrap_err();
        match err {
            Error::ConfigParse { path, .. } => {
                assert_eq!(path, PathBuf::from("/repo/hookah.yml"));
            }
            other => panic!("expected ConfigParse, got {other:?}"),
        }
    }

    #[test]
    fn test_save_writes_source_dir_key() {
        let system = MemorySystem::new();
        let path = Config::default()
            .save(&system, Path::new("/repo"))
            .unwrap();

        assert_eq!(path, PathBuf::from("/repo/hookah.yml"));
        let content = String::from_utf8(system.read_file(&path).unwrap()).unwrap();
        assert!(content.contains("source-dir: .hookah"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let system = MemorySystem::new();
        let original = Config {
            source_dir: PathBuf::from("ci/hooks"),
        };
        original.save(&system, Path::new("/repo")).unwrap();

        let loaded = Config::load(&system, Path::new("/repo")).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_with_source_dir_override() {
        let config = Config::default().with_source_dir(Some(PathBuf::from("other")));
        assert_eq!(config.source_dir, PathBuf::from("other"));

        let config = Config::default().with_source_dir(None);
        assert_eq!(config.source_dir, PathBuf::from(".hookah"));
    }
}
