use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    schedule::RecurringSeries,
    utils::persistence::{load_json_if_exists, save_json},
};

use super::{Result, SeriesStore};

pub const SERIES_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SeriesDocument {
    #[serde(default = "SeriesDocument::schema_version_default")]
    schema_version: u8,
    #[serde(default)]
    series: Vec<RecurringSeries>,
}

impl SeriesDocument {
    fn schema_version_default() -> u8 {
        SERIES_SCHEMA_VERSION
    }
}

/// Stores every series in one JSON document. Each mutation rewrites the whole file
/// atomically; a missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonSeriesStore {
    path: PathBuf,
}

impl JsonSeriesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<RecurringSeries>> {
        let document: Option<SeriesDocument> = load_json_if_exists(&self.path)?;
        Ok(document.map(|doc| doc.series).unwrap_or_default())
    }

    fn write(&self, series: Vec<RecurringSeries>) -> Result<()> {
        let document = SeriesDocument {
            schema_version: SERIES_SCHEMA_VERSION,
            series,
        };
        save_json(&document, &self.path)
    }
}

impl SeriesStore for JsonSeriesStore {
    fn list(&self) -> Result<Vec<RecurringSeries>> {
        self.read()
    }

    fn save(&mut self, series: &RecurringSeries) -> Result<()> {
        let mut all = self.read()?;
        match all.iter_mut().find(|existing| existing.id == series.id) {
            Some(existing) => *existing = series.clone(),
            None => all.push(series.clone()),
        }
        self.write(all)?;
        tracing::debug!(series = %series.id, path = %self.path.display(), "series saved");
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<bool> {
        let mut all = self.read()?;
        let before = all.len();
        all.retain(|series| series.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.write(all)?;
        tracing::debug!(series = %id, path = %self.path.display(), "series deleted");
        Ok(true)
    }
}
