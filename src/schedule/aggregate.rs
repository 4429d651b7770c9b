use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::counter::count_in_month;
use super::month::MonthRef;
use super::series::{RecurringSeries, SeriesKind};

/// Monthly money flow split by bucket. All three totals are non-negative magnitudes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub income_total: f64,
    pub expense_total: f64,
    pub debt_total: f64,
}

impl MonthlyTotals {
    pub fn net(&self) -> f64 {
        self.income_total - self.expense_total - self.debt_total
    }

    fn record(&mut self, kind: SeriesKind, magnitude: f64) {
        match kind {
            SeriesKind::Income => self.income_total += magnitude,
            SeriesKind::Expense => self.expense_total += magnitude,
            SeriesKind::DebtPayment => self.debt_total += magnitude,
        }
    }
}

impl Add for MonthlyTotals {
    type Output = MonthlyTotals;

    fn add(self, rhs: MonthlyTotals) -> MonthlyTotals {
        MonthlyTotals {
            income_total: self.income_total + rhs.income_total,
            expense_total: self.expense_total + rhs.expense_total,
            debt_total: self.debt_total + rhs.debt_total,
        }
    }
}

impl Sum for MonthlyTotals {
    fn sum<I: Iterator<Item = MonthlyTotals>>(iter: I) -> Self {
        iter.fold(MonthlyTotals::default(), Add::add)
    }
}

/// Exact totals for `month`: each series contributes `|amount| × count_in_month`.
///
/// Debt payments always land in `debt_total`, never in `expense_total`.
pub fn aggregate(series_list: &[RecurringSeries], month: MonthRef) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for series in series_list {
        let count = count_in_month(series, month);
        if count > 0 {
            totals.record(series.kind, series.amount.abs() * count as f64);
        }
    }
    totals
}

/// One [`aggregate`] per month, for `months` consecutive months starting at `start`.
pub fn forecast(
    series_list: &[RecurringSeries],
    start: MonthRef,
    months: u32,
) -> Vec<(MonthRef, MonthlyTotals)> {
    (0..months as i64)
        .map(|offset| {
            let month = start.offset(offset);
            (month, aggregate(series_list, month))
        })
        .collect()
}

/// Signed monthly estimate from the approximate multiplier table.
///
/// This is the rough per-month figure used in summary cards; it is not a count of a
/// real calendar month and should not be mixed with [`aggregate`].
pub fn estimate_monthly(series: &RecurringSeries) -> f64 {
    if !series.is_active() {
        return 0.0;
    }
    series.amount * series.frequency.monthly_multiplier()
}

/// Bucketed totals built from [`estimate_monthly`].
pub fn estimate_totals(series_list: &[RecurringSeries]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for series in series_list {
        totals.record(series.kind, estimate_monthly(series).abs());
    }
    totals
}
