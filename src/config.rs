//! Store configuration.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! The configuration is passed to the store constructor; nothing is read from
//! process-wide state after construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{PaddockError, Result};

/// Environment variable overriding [`StoreConfig::cache_dir`].
pub const CACHE_DIR_ENV: &str = "PADDOCK_CACHE_DIR";
/// Environment variable overriding [`StoreConfig::cache_enabled`].
pub const CACHE_ENABLED_ENV: &str = "PADDOCK_CACHE_ENABLED";

const DEFAULT_CACHE_DIR: &str = "./f1_cache";

/// Configuration for the recorded session store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding schedules and session recordings
    pub cache_dir: PathBuf,
    /// Keep parsed recordings in memory between loads
    pub cache_enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { cache_dir: PathBuf::from(DEFAULT_CACHE_DIR), cache_enabled: true }
    }
}

impl StoreConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into(), ..Default::default() }
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Load config: env vars → file (when it exists) → defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_yaml_file(path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PaddockError::file_error(path.to_path_buf(), e))?;
        serde_yaml_ng::from_str(&text).map_err(|e| PaddockError::Config {
            details: format!("{}: {}", path.display(), e),
        })
    }

    /// Default config with environment overrides applied.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `PADDOCK_*` overrides from `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(CACHE_DIR_ENV) {
            debug!(cache_dir = %dir, "Cache directory overridden from environment");
            self.cache_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(CACHE_ENABLED_ENV) {
            self.cache_enabled = parse_flag(&value).ok_or_else(|| PaddockError::Config {
                details: format!("{CACHE_ENABLED_ENV} must be a boolean, got '{value}'"),
            })?;
        }
        Ok(())
    }

    /// Create the cache directory if it does not exist.
    pub fn ensure_cache_dir(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.cache_dir)
            .map_err(|e| PaddockError::file_error(self.cache_dir.clone(), e))?;
        info!(cache_dir = %self.cache_dir.display(), enabled = self.cache_enabled, "Session cache ready");
        Ok(self.cache_dir.clone())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_local_cache() {
        let config = StoreConfig::default();
        assert_eq!(config.cache_dir, PathBuf::from("./f1_cache"));
        assert!(config.cache_enabled);
    }

    #[test]
    fn overrides_replace_defaults() {
        let env: HashMap<&str, &str> =
            HashMap::from([(CACHE_DIR_ENV, "/srv/f1"), (CACHE_ENABLED_ENV, "off")]);
        let mut config = StoreConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.cache_dir, PathBuf::from("/srv/f1"));
        assert!(!config.cache_enabled);
    }

    #[test]
    fn invalid_flag_is_a_config_error() {
        let mut config = StoreConfig::default();
        let err = config
            .apply_overrides(|key| (key == CACHE_ENABLED_ENV).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, PaddockError::Config { .. }));
    }

    #[test]
    fn reads_yaml_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paddock.yaml");
        std::fs::write(&path, "CacheDir: /data/recordings\n").unwrap();

        let config = StoreConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.cache_dir, PathBuf::from("/data/recordings"));
        assert!(config.cache_enabled);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert_eq!(config, StoreConfig::from_env().unwrap());
    }

    #[test]
    fn ensure_cache_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("a").join("b"));
        let created = config.ensure_cache_dir().unwrap();
        assert!(created.is_dir());
    }
}
