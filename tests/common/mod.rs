#![allow(dead_code)]

use cashflow_core::{config::ConfigManager, storage::JsonSeriesStore};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Isolated data directory. The directory is removed when the value drops.
pub struct TestEnv {
    pub dir: TempDir,
    pub store: JsonSeriesStore,
    pub config: ConfigManager,
}

pub fn setup_test_env() -> TestEnv {
    let dir = TempDir::new().expect("create temp dir");
    let config =
        ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("create config manager");
    let store = JsonSeriesStore::new(dir.path().join("series.json"));
    TestEnv { dir, store, config }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
