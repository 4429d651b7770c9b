use crate::core::time::Clock;
use crate::schedule::{self, CalendarGrid, MonthRef, MonthlyTotals, Occurrence, WeekStart};
use crate::storage::SeriesStore;

use super::ServiceResult;

/// Takes a fresh snapshot from the store and hands it to the occurrence engine.
///
/// Nothing is cached: call again after any series mutation.
pub struct SummaryService;

impl SummaryService {
    pub fn month_totals<S: SeriesStore + ?Sized>(
        store: &S,
        month: MonthRef,
    ) -> ServiceResult<MonthlyTotals> {
        let snapshot = store.list()?;
        Ok(schedule::aggregate(&snapshot, month))
    }

    pub fn estimated_totals<S: SeriesStore + ?Sized>(store: &S) -> ServiceResult<MonthlyTotals> {
        let snapshot = store.list()?;
        Ok(schedule::estimate_totals(&snapshot))
    }

    pub fn forecast<S: SeriesStore + ?Sized>(
        store: &S,
        start: MonthRef,
        months: u32,
    ) -> ServiceResult<Vec<(MonthRef, MonthlyTotals)>> {
        let snapshot = store.list()?;
        Ok(schedule::forecast(&snapshot, start, months))
    }

    pub fn calendar<S: SeriesStore + ?Sized>(
        store: &S,
        month: MonthRef,
        week_start: WeekStart,
    ) -> ServiceResult<CalendarGrid> {
        let snapshot = store.list()?;
        Ok(schedule::build_with(month, &snapshot, week_start))
    }

    pub fn upcoming<S: SeriesStore + ?Sized>(
        store: &S,
        clock: &dyn Clock,
        days: u32,
    ) -> ServiceResult<Vec<Occurrence>> {
        let snapshot = store.list()?;
        Ok(schedule::upcoming(&snapshot, clock.today(), days))
    }
}
