//! Month calendar grid: 6 weeks × 7 days, with each day's occurrences attached.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::{shift_days, MonthRef};
use super::projector::{project, ProjectionWindow};
use super::series::{Occurrence, RecurringSeries};

pub const GRID_WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn leading_padding(self, first: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => first.weekday().num_days_from_sunday(),
            WeekStart::Monday => first.weekday().num_days_from_monday(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Day of month; `None` for padding cells from neighbouring months.
    pub day: Option<u32>,
    pub in_month: bool,
    pub occurrences: Vec<Occurrence>,
    /// Signed sum of the cell's occurrence amounts.
    pub daily_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid {
    pub month: MonthRef,
    pub week_start: WeekStart,
    pub weeks: Vec<Vec<DayCell>>,
}

impl CalendarGrid {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten()
    }

    pub fn in_month_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.cells().filter(|cell| cell.in_month)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date == date)
    }

    pub fn monthly_net(&self) -> f64 {
        self.in_month_cells().map(|cell| cell.daily_total).sum()
    }
}

/// Builds the grid for `month` with weeks starting on Sunday.
pub fn build(month: MonthRef, series_list: &[RecurringSeries]) -> CalendarGrid {
    build_with(month, series_list, WeekStart::Sunday)
}

pub fn build_with(
    month: MonthRef,
    series_list: &[RecurringSeries],
    week_start: WeekStart,
) -> CalendarGrid {
    let mut by_day = occurrences_by_day(month, series_list);

    let first = month.first_day();
    let grid_start = shift_days(first, -(week_start.leading_padding(first) as i64));
    let mut cells = Vec::with_capacity(GRID_WEEKS * DAYS_PER_WEEK);
    for offset in 0..(GRID_WEEKS * DAYS_PER_WEEK) as i64 {
        // Cells past the last representable date become padding.
        let date = grid_start.checked_add_signed(Duration::days(offset));
        let in_month = date.is_some_and(|date| month.contains(date));
        let date = date.unwrap_or(NaiveDate::MAX);
        let occurrences: Vec<Occurrence> = if in_month {
            by_day
                .remove(&date)
                .unwrap_or_default()
                .into_iter()
                .map(|(_, occurrence)| occurrence)
                .collect()
        } else {
            Vec::new()
        };
        let daily_total: f64 = occurrences.iter().map(|o| o.amount).sum();
        cells.push(DayCell {
            date,
            day: in_month.then(|| date.day()),
            in_month,
            occurrences,
            daily_total,
        });
    }

    let weeks: Vec<Vec<DayCell>> = cells
        .chunks(DAYS_PER_WEEK)
        .map(|week| week.to_vec())
        .collect();
    tracing::debug!(
        month = %month,
        series = series_list.len(),
        "built calendar grid"
    );

    CalendarGrid {
        month,
        week_start,
        weeks,
    }
}

/// Stored anchors plus projected instances for every in-month day, each day ordered
/// stored-first and then by series name.
fn occurrences_by_day(
    month: MonthRef,
    series_list: &[RecurringSeries],
) -> BTreeMap<NaiveDate, Vec<(String, Occurrence)>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<(String, Occurrence)>> = BTreeMap::new();
    for series in series_list.iter().filter(|s| s.is_active()) {
        let anchor = series.anchor_date;
        if month.contains(anchor) {
            by_day
                .entry(anchor)
                .or_default()
                .push((series.name.clone(), series.occurrence(anchor)));
        }
        for date in project(series, ProjectionWindow::month(month)) {
            if date == anchor {
                continue;
            }
            by_day
                .entry(date)
                .or_default()
                .push((series.name.clone(), series.occurrence(date)));
        }
    }
    for entries in by_day.values_mut() {
        entries.sort_by(|(a_name, a), (b_name, b)| {
            a.is_projected
                .cmp(&b.is_projected)
                .then_with(|| a_name.cmp(b_name))
        });
    }
    by_day
}
