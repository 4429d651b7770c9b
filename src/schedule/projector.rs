//! Concrete occurrence dates for a series inside a date window.
//!
//! Calendar-month expansion and the "upcoming" list both go through [`project`]; they
//! only differ in the window they pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::{Step, StepRule, SEMI_MONTHLY_DAYS};
use super::month::{shift_days, MonthRef};
use super::series::{Occurrence, RecurringSeries};
use crate::errors::CashflowError;

const MAX_PROJECTED_OCCURRENCES: usize = 1024;

/// The half-open date range `(after, through]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    pub after: NaiveDate,
    pub through: NaiveDate,
}

impl ProjectionWindow {
    pub fn new(after: NaiveDate, through: NaiveDate) -> Result<Self, CashflowError> {
        if through <= after {
            return Err(CashflowError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { after, through })
    }

    /// Every day of `month`.
    pub fn month(month: MonthRef) -> Self {
        Self {
            after: shift_days(month.first_day(), -1),
            through: month.last_day(),
        }
    }

    /// `today` and the following `days` days, cut off at the last representable date.
    pub fn upcoming(today: NaiveDate, days: u32) -> Self {
        Self {
            after: shift_days(today, -1),
            through: shift_days(today, days as i64),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.after && date <= self.through
    }
}

/// Sorted, de-duplicated occurrence dates of `series` inside `window`.
///
/// Dates before the anchor are included: a series projects backwards as well as
/// forwards. Paused series yield nothing.
pub fn project(series: &RecurringSeries, window: ProjectionWindow) -> Vec<NaiveDate> {
    if !series.is_active() {
        return Vec::new();
    }
    let anchor = series.anchor_date;
    let mut dates = match series.frequency.step() {
        Step::Fixed(rule) => project_fixed(rule, anchor, window),
        Step::SemiMonthly => project_semi_monthly(window),
        Step::Once => {
            if window.contains(anchor) {
                vec![anchor]
            } else {
                Vec::new()
            }
        }
    };
    dates.sort();
    dates.dedup();
    dates
}

/// Occurrences of one series in one calendar month.
pub fn expand_month(series: &RecurringSeries, month: MonthRef) -> Vec<Occurrence> {
    project(series, ProjectionWindow::month(month))
        .into_iter()
        .map(|date| series.occurrence(date))
        .collect()
}

/// Occurrences of every active series from `today` through `today + days`, ordered by
/// date and then by series name.
pub fn upcoming(series_list: &[RecurringSeries], today: NaiveDate, days: u32) -> Vec<Occurrence> {
    let window = ProjectionWindow::upcoming(today, days);
    let mut entries: Vec<(&str, Occurrence)> = series_list
        .iter()
        .flat_map(|series| {
            project(series, window)
                .into_iter()
                .map(move |date| (series.name.as_str(), series.occurrence(date)))
        })
        .collect();
    entries.sort_by(|(a_name, a), (b_name, b)| {
        a.date.cmp(&b.date).then_with(|| a_name.cmp(b_name))
    });
    entries.into_iter().map(|(_, occurrence)| occurrence).collect()
}

/// Jumps straight to the step just before the window, then walks forward in whole steps
/// until the step position passes the window end.
fn project_fixed(rule: StepRule, anchor: NaiveDate, window: ProjectionWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let end = rule.position(window.through);
    let mut k = rule.index_at_or_before(anchor, window.after);
    while rule.position_of(anchor, k) <= end {
        if let Some(date) = rule.nth(anchor, k) {
            if window.contains(date) {
                dates.push(date);
                if dates.len() >= MAX_PROJECTED_OCCURRENCES {
                    tracing::debug!(
                        anchor = %anchor,
                        "projection truncated at {MAX_PROJECTED_OCCURRENCES} occurrences"
                    );
                    break;
                }
            }
        }
        k += 1;
    }
    dates
}

fn project_semi_monthly(window: ProjectionWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut month = MonthRef::of(window.after);
    let last = MonthRef::of(window.through);
    while month <= last && dates.len() < MAX_PROJECTED_OCCURRENCES {
        dates.extend(
            SEMI_MONTHLY_DAYS
                .iter()
                .filter_map(|day| month.day(*day))
                .filter(|date| window.contains(*date)),
        );
        month = month.next();
    }
    dates
}
