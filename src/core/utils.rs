use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::CashflowError;

const DEFAULT_DIR_NAME: &str = ".cashflow_core";
const HOME_ENV: &str = "CASHFLOW_HOME";
const CONFIG_FILE: &str = "config.json";
const SERIES_FILE: &str = "series.json";

/// Resolves the application data layout.
pub struct PathResolver;

impl PathResolver {
    /// Base directory: `$CASHFLOW_HOME` when set, otherwise `~/.cashflow_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn series_file_in(base: &Path) -> PathBuf {
        base.join(SERIES_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), CashflowError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
