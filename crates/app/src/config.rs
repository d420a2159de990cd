//! App configuration. Loaded from `shinjuku.ron` at startup.

use std::path::Path;

use anyhow::{Context, Result};
use citygen::CityConfig;
use serde::{Deserialize, Serialize};
use weather::{Location, RANKING_DAYS};

/// Persistent settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed seed; a fresh one is drawn each run when unset.
    pub seed: Option<u64>,
    pub city: CityConfig,
    pub location: Location,
    /// Days covered by the precipitation ranking URL.
    pub ranking_days: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            city: CityConfig::default(),
            location: Location::shinjuku(),
            ranking_days: RANKING_DAYS,
        }
    }
}

impl AppConfig {
    /// Load config from `path`. If the file is missing or invalid, returns default config.
    pub fn load(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => {
                    log::info!("Loaded config from {:?}", path);
                    return c;
                }
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("serializing config")?;
        std::fs::write(path, s).with_context(|| format!("writing config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.ron"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shinjuku.ron");
        std::fs::write(&path, "(seed: \"not a number\"").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shinjuku.ron");
        std::fs::write(&path, "(seed: Some(7), city: (rules: (max_attempts: 3)))").unwrap();
        let config = AppConfig::load(&path);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.city.rules.max_attempts, 3);
        assert_eq!(config.city.blocks.len(), 16);
        assert_eq!(config.location, Location::shinjuku());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shinjuku.ron");
        let config = AppConfig {
            seed: Some(99),
            ranking_days: 14,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path), config);
    }
}
