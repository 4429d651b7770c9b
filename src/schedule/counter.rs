//! Exact occurrence counts per calendar month.

use chrono::{Datelike, NaiveDate};

use super::frequency::{Frequency, SEMI_MONTHLY_DAYS};
use super::month::MonthRef;
use super::series::RecurringSeries;

/// How many times `series` recurs inside `month`.
///
/// Paused series and unrecognised frequency labels count zero.
pub fn count_in_month(series: &RecurringSeries, month: MonthRef) -> u32 {
    if !series.is_active() {
        return 0;
    }
    let anchor = series.anchor_date;
    let months_from_anchor = month.months_since(MonthRef::of(anchor));
    match &series.frequency {
        Frequency::Daily => month.days(),
        Frequency::Weekly => count_day_steps(anchor, month, 7),
        Frequency::BiWeekly => count_day_steps(anchor, month, 14),
        Frequency::SemiMonthly => SEMI_MONTHLY_DAYS.len() as u32,
        Frequency::Monthly => u32::from(month.day(anchor.day()).is_some()),
        Frequency::Quarterly => u32::from(months_from_anchor.rem_euclid(3) == 0),
        Frequency::SemiAnnually => u32::from(months_from_anchor.rem_euclid(6) == 0),
        Frequency::Annually => u32::from(months_from_anchor.rem_euclid(12) == 0),
        Frequency::Other(label) => {
            tracing::debug!(
                series = %series.id,
                label = %label,
                "unrecognised frequency counts zero"
            );
            0
        }
    }
}

/// Counts the dates `anchor + k * step` (any integer `k`) that fall inside `month`.
///
/// The phase comes from the day difference modulo `step`, so the answer only depends
/// on the anchor and the month, never on when the question is asked.
fn count_day_steps(anchor: NaiveDate, month: MonthRef, step: i64) -> u32 {
    let first = month.first_day();
    let phase = (first - anchor).num_days().rem_euclid(step);
    let first_offset = (step - phase) % step;
    let days = month.days() as i64;
    if first_offset >= days {
        return 0;
    }
    ((days - 1 - first_offset) / step + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::series::SeriesKind;
    use chrono::{Duration, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthRef {
        MonthRef::new(y, m).unwrap()
    }

    fn series(frequency: Frequency, anchor: NaiveDate) -> RecurringSeries {
        RecurringSeries::new("Test", -10.0, frequency, anchor, SeriesKind::Expense)
    }

    #[test]
    fn daily_counts_every_day() {
        let daily = series(Frequency::Daily, date(2024, 1, 1));
        assert_eq!(count_in_month(&daily, month(2024, 2)), 29);
        assert_eq!(count_in_month(&daily, month(2023, 2)), 28);
        assert_eq!(count_in_month(&daily, month(2023, 12)), 31);
    }

    #[test]
    fn weekly_counts_matching_weekdays() {
        let monday = date(2024, 1, 1);
        assert_eq!(monday.weekday(), Weekday::Mon);
        let weekly = series(Frequency::Weekly, monday);
        for m in 1..=12 {
            let target = month(2024, m);
            let mondays = (0..target.days())
                .map(|offset| target.first_day() + Duration::days(offset as i64))
                .filter(|d| d.weekday() == Weekday::Mon)
                .count() as u32;
            assert_eq!(count_in_month(&weekly, target), mondays, "month {m}");
            assert!(mondays == 4 || mondays == 5);
        }
    }

    #[test]
    fn monthly_skips_months_without_anchor_day() {
        let rent = series(Frequency::Monthly, date(2024, 1, 31));
        assert_eq!(count_in_month(&rent, month(2024, 2)), 0);
        assert_eq!(count_in_month(&rent, month(2024, 3)), 1);
        assert_eq!(count_in_month(&rent, month(2024, 4)), 0);
        let fifteenth = series(Frequency::Monthly, date(2024, 1, 15));
        for m in 1..=12 {
            assert_eq!(count_in_month(&fifteenth, month(2025, m)), 1);
        }
    }

    #[test]
    fn semi_monthly_is_always_two() {
        for day in [1, 10, 15, 28] {
            let pay = series(Frequency::SemiMonthly, date(2024, 3, day));
            for m in 1..=12 {
                assert_eq!(count_in_month(&pay, month(2023, m)), 2);
            }
        }
    }

    #[test]
    fn quarterly_semi_annual_and_annual_follow_anchor_month() {
        let anchor = date(2024, 2, 10);
        let quarterly = series(Frequency::Quarterly, anchor);
        let semi = series(Frequency::SemiAnnually, anchor);
        let annual = series(Frequency::Annually, anchor);
        let hits = |s: &RecurringSeries| -> Vec<u32> {
            (1..=12)
                .filter(|m| count_in_month(s, month(2025, *m)) == 1)
                .collect()
        };
        assert_eq!(hits(&quarterly), vec![2, 5, 8, 11]);
        assert_eq!(hits(&semi), vec![2, 8]);
        assert_eq!(hits(&annual), vec![2]);
        // Months before the anchor follow the same phase.
        assert_eq!(count_in_month(&quarterly, month(2023, 11)), 1);
    }

    #[test]
    fn bi_weekly_matches_brute_force_listing() {
        let anchor = date(2024, 1, 5);
        let pay = series(Frequency::BiWeekly, anchor);
        let december = month(2024, 12);
        let listed = (-60..60)
            .map(|k| anchor + Duration::days(14 * k))
            .filter(|d| december.contains(*d))
            .count() as u32;
        assert_eq!(count_in_month(&pay, december), listed);
        assert_eq!(listed, 2);
    }

    #[test]
    fn bi_weekly_handles_anchor_far_from_target() {
        let anchor = date(2031, 7, 18);
        let pay = series(Frequency::BiWeekly, anchor);
        for m in 1..=12 {
            let target = month(2019, m);
            let listed = (-400..0)
                .map(|k| anchor + Duration::days(14 * k))
                .filter(|d| target.contains(*d))
                .count() as u32;
            assert_eq!(count_in_month(&pay, target), listed, "month {m}");
        }
    }

    #[test]
    fn paused_and_unknown_count_zero() {
        let paused = series(Frequency::Daily, date(2024, 1, 1)).paused();
        assert_eq!(count_in_month(&paused, month(2024, 1)), 0);
        let unknown = series(Frequency::Other("whenever".into()), date(2024, 1, 1));
        assert_eq!(count_in_month(&unknown, month(2024, 1)), 0);
    }
}
