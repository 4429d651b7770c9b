use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::CashflowError,
    schedule::WeekStart,
    utils::persistence,
};

pub const DEFAULT_UPCOMING_DAYS: u32 = 30;
/// Longest upcoming list the CLI will build, in days.
pub const MAX_UPCOMING_DAYS: u32 = 3_660;
pub const MAX_FORECAST_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default = "Config::default_upcoming_days")]
    pub upcoming_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_file: Option<PathBuf>,
}

impl Config {
    fn default_upcoming_days() -> u32 {
        DEFAULT_UPCOMING_DAYS
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            week_start: WeekStart::Sunday,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            series_file: None,
        }
    }
}

/// Loads and saves [`Config`] under the application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, CashflowError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CashflowError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, CashflowError> {
        Ok(persistence::load_json_if_exists(&self.path)?.unwrap_or_default())
    }

    pub fn save(&self, config: &Config) -> Result<(), CashflowError> {
        persistence::save_json(config, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Series file from the config, else the default location in the data directory.
    pub fn series_file(&self, config: &Config) -> PathBuf {
        config
            .series_file
            .clone()
            .unwrap_or_else(|| PathResolver::series_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.upcoming_days, 30);
        assert_eq!(
            manager.series_file(&config),
            temp.path().join("series.json")
        );
    }

    #[test]
    fn save_and_reload_preserves_values() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency: "EUR".into(),
            week_start: WeekStart::Monday,
            upcoming_days: 14,
            series_file: Some(temp.path().join("custom.json")),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert!(manager.path().exists());
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        std::fs::write(manager.path(), r#"{"locale":"pt-PT","currency":"EUR"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.upcoming_days, DEFAULT_UPCOMING_DAYS);
    }
}
