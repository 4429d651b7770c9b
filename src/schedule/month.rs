use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CashflowError;

/// A calendar month, the unit every monthly query is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

impl MonthRef {
    /// Validates the month. Years at chrono's outer limits are rejected so that the
    /// neighbouring months a grid or window reaches into always exist.
    pub fn new(year: i32, month: u32) -> Result<Self, CashflowError> {
        let supported = (NaiveDate::MIN.year() + 1)..=(NaiveDate::MAX.year() - 1);
        if !(1..=12).contains(&month) || !supported.contains(&year) {
            return Err(CashflowError::InvalidInput(format!(
                "month {year}-{month:02} is out of range"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day() + Duration::days(self.days() as i64 - 1)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the date with the given day in this month, if the month has that day.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Like [`MonthRef::day`], but falls back to the last day for short months.
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        self.day(day.min(self.days())).unwrap_or_else(|| self.last_day())
    }

    /// Months since year zero; differences between indices count whole months.
    pub fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn offset(&self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// Signed number of months from `other` to `self`.
    pub fn months_since(&self, other: MonthRef) -> i64 {
        self.index() - other.index()
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthRef {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CashflowError::InvalidInput(format!("expected YYYY-MM, got `{s}`"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthRef::new(year, month)
    }
}

/// Moves `date` by `days`, saturating at chrono's first and last representable dates.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(first_next)) => (first_next - first).num_days() as u32,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn offset_wraps_across_years() {
        let jan = MonthRef::new(2024, 1).unwrap();
        assert_eq!(jan.previous(), MonthRef::new(2023, 12).unwrap());
        assert_eq!(jan.offset(14), MonthRef::new(2025, 3).unwrap());
        assert_eq!(jan.offset(-25), MonthRef::new(2021, 12).unwrap());
        assert_eq!(jan.offset(14).months_since(jan), 14);
    }

    #[test]
    fn parses_and_displays_year_month() {
        let month: MonthRef = "2024-03".parse().unwrap();
        assert_eq!(month.to_string(), "2024-03");
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert!("2024-13".parse::<MonthRef>().is_err());
        assert!("March".parse::<MonthRef>().is_err());
    }

    #[test]
    fn rejects_years_at_the_calendar_limits() {
        let last_year = NaiveDate::MAX.year();
        assert!(MonthRef::new(last_year, 12).is_err());
        assert!(format!("{last_year}-12").parse::<MonthRef>().is_err());
        assert!(MonthRef::new(NaiveDate::MIN.year(), 1).is_err());
        assert!(MonthRef::new(last_year - 1, 12).is_ok());
    }

    #[test]
    fn shift_days_saturates() {
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(
            shift_days(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(), 2),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn day_clamped_falls_back_to_last_day() {
        let feb = MonthRef::new(2023, 2).unwrap();
        assert_eq!(feb.day(31), None);
        assert_eq!(
            feb.day_clamped(31),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }
}
