//! Configuration for takehead
//!
//! Supports loading from `.takehead.toml` (repo) or `<config dir>/takehead/config.toml` (global).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::markers::MarkerSet;

/// File name of the repo-local config
pub const REPO_CONFIG_FILE: &str = ".takehead.toml";

/// File resolved when no paths are given
pub const DEFAULT_TARGET: &str = "fb-core/src/world.rs";

/// Full takehead configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TakeheadConfig {
    /// Marker literals to match
    pub markers: MarkerSet,

    /// Default file to resolve
    pub target: TargetConfig,
}

/// Default target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Path relative to the repository root (or working directory outside a repo)
    pub path: PathBuf,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_TARGET),
        }
    }
}

impl TakeheadConfig {
    /// Load configuration from repo root, falling back to global config
    pub fn load(repo_root: &Path) -> Result<Self> {
        let repo_config = Self::repo_config_path(repo_root);
        if repo_config.exists() {
            return Self::load_from_file(&repo_config);
        }

        if let Some(global_config) = Self::global_config_path() {
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check the loaded values are usable
    pub fn validate(&self) -> Result<()> {
        self.markers.validate()
    }

    /// Get global config path (<config dir>/takehead/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("takehead").join("config.toml"))
    }

    /// Get repo-local config path
    pub fn repo_config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(REPO_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TakeheadConfig::default();
        assert_eq!(config.markers, MarkerSet::default());
        assert_eq!(config.target.path, PathBuf::from("fb-core/src/world.rs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[markers]
end = ">>>>>>> origin/develop"

[target]
path = "src/lib.rs"
"#;

        let config: TakeheadConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.markers.start, "<<<<<<< HEAD");
        assert_eq!(config.markers.separator, "=======");
        assert_eq!(config.markers.end, ">>>>>>> origin/develop");
        assert_eq!(config.target.path, PathBuf::from("src/lib.rs"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(REPO_CONFIG_FILE);

        std::fs::write(
            &config_path,
            r#"
[markers]
start = "<<<<<<< ours"
"#,
        )
        .unwrap();

        let config = TakeheadConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.markers.start, "<<<<<<< ours");
        assert_eq!(config.target.path, PathBuf::from(DEFAULT_TARGET));
    }

    #[test]
    fn test_repo_config_takes_precedence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            TakeheadConfig::repo_config_path(dir.path()),
            "[target]\npath = \"other.rs\"\n",
        )
        .unwrap();

        let config = TakeheadConfig::load(dir.path()).unwrap();
        assert_eq!(config.target.path, PathBuf::from("other.rs"));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(REPO_CONFIG_FILE);
        std::fs::write(&config_path, "[markers]\nseparator = \"\"\n").unwrap();

        let err = TakeheadConfig::load_from_file(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("separator"));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(REPO_CONFIG_FILE);
        std::fs::write(&config_path, "[markers\n").unwrap();

        let err = TakeheadConfig::load_from_file(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
