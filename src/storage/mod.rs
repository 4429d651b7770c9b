pub mod json_backend;

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{errors::CashflowError, schedule::RecurringSeries};

pub type Result<T> = std::result::Result<T, CashflowError>;

/// The backing store holding recurring series. It is the single source of truth; the
/// occurrence engine only ever sees snapshots returned by [`SeriesStore::list`].
pub trait SeriesStore {
    fn list(&self) -> Result<Vec<RecurringSeries>>;

    /// Inserts the series, or replaces the stored series with the same id.
    fn save(&mut self, series: &RecurringSeries) -> Result<()>;

    /// Removes the series, returning whether anything was deleted.
    fn delete(&mut self, id: Uuid) -> Result<bool>;

    fn get(&self, id: Uuid) -> Result<Option<RecurringSeries>> {
        Ok(self.list()?.into_iter().find(|series| series.id == id))
    }
}

/// In-process store, mostly for tests and short-lived sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    series: BTreeMap<Uuid, RecurringSeries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: impl IntoIterator<Item = RecurringSeries>) -> Self {
        Self {
            series: series.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesStore for MemoryStore {
    fn list(&self) -> Result<Vec<RecurringSeries>> {
        Ok(self.series.values().cloned().collect())
    }

    fn save(&mut self, series: &RecurringSeries) -> Result<()> {
        self.series.insert(series.id, series.clone());
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<bool> {
        Ok(self.series.remove(&id).is_some())
    }

    fn get(&self, id: Uuid) -> Result<Option<RecurringSeries>> {
        Ok(self.series.get(&id).cloned())
    }
}

pub use json_backend::JsonSeriesStore;
