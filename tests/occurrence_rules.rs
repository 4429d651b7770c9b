mod common;

use cashflow_core::schedule::{
    aggregate, build, count_in_month, project, upcoming, Frequency, MonthRef, ProjectionWindow,
    RecurringSeries,
};
use chrono::{Datelike, Duration, Weekday};
use common::date;

fn month(y: i32, m: u32) -> MonthRef {
    MonthRef::new(y, m).unwrap()
}

#[test]
fn monthly_day_31_skips_february() {
    let series = RecurringSeries::expense("Storage", 100.0, Frequency::Monthly, date(2024, 1, 31));
    assert_eq!(series.amount, -100.0);
    assert_eq!(count_in_month(&series, month(2024, 2)), 0);
    assert_eq!(count_in_month(&series, month(2024, 3)), 1);
    assert!(project(&series, ProjectionWindow::month(month(2024, 2))).is_empty());
}

#[test]
fn monthly_counts_one_when_day_exists() {
    for day in 1..=28 {
        let series =
            RecurringSeries::expense("Bill", 10.0, Frequency::Monthly, date(2023, 7, day));
        for offset in 0..24 {
            assert_eq!(count_in_month(&series, month(2024, 1).offset(offset)), 1);
        }
    }
}

#[test]
fn semi_monthly_is_the_first_and_fifteenth() {
    let series =
        RecurringSeries::income("Paycheck", 2000.0, Frequency::SemiMonthly, date(2024, 3, 10));
    assert_eq!(
        project(&series, ProjectionWindow::month(month(2024, 3))),
        vec![date(2024, 3, 1), date(2024, 3, 15)]
    );
    for offset in -12..12 {
        assert_eq!(count_in_month(&series, month(2024, 3).offset(offset)), 2);
    }
}

#[test]
fn weekly_monday_counts_mondays() {
    let series = RecurringSeries::expense("Lunch", 12.0, Frequency::Weekly, date(2024, 1, 1));
    assert_eq!(series.anchor_date.weekday(), Weekday::Mon);
    for m in 1..=12 {
        let target = month(2024, m);
        let mondays = (1..=target.days())
            .filter_map(|d| target.day(d))
            .filter(|d| d.weekday() == Weekday::Mon)
            .count() as u32;
        assert!(mondays == 4 || mondays == 5);
        assert_eq!(count_in_month(&series, target), mondays, "month {target}");
    }
}

#[test]
fn bi_weekly_matches_brute_force_listing() {
    let anchor = date(2024, 1, 5);
    let series = RecurringSeries::expense("Cleaner", 50.0, Frequency::BiWeekly, anchor);
    let december = month(2024, 12);
    let listed: Vec<_> = (0..60)
        .map(|k| anchor + Duration::days(14 * k))
        .filter(|d| december.contains(*d))
        .collect();
    assert_eq!(count_in_month(&series, december) as usize, listed.len());
    assert_eq!(project(&series, ProjectionWindow::month(december)), listed);
}

#[test]
fn bi_weekly_has_no_drift_between_query_dates() {
    let series =
        RecurringSeries::income("Salary", 1800.0, Frequency::BiWeekly, date(2023, 2, 10));
    let december = month(2024, 12);
    let in_december = |today, days| -> Vec<_> {
        upcoming(std::slice::from_ref(&series), today, days)
            .into_iter()
            .map(|occurrence| occurrence.date)
            .filter(|d| december.contains(*d))
            .collect()
    };
    let early = in_december(date(2024, 5, 20), 240);
    let late = in_december(date(2024, 12, 1), 30);
    assert!(!early.is_empty());
    assert_eq!(early, late);
}

#[test]
fn aggregate_is_additive() {
    let anchor = date(2024, 1, 15);
    let left = vec![
        RecurringSeries::income("Salary", 2500.0, Frequency::BiWeekly, anchor),
        RecurringSeries::expense("Rent", 1000.0, Frequency::Monthly, anchor),
    ];
    let right = vec![
        RecurringSeries::expense("Coffee", 4.0, Frequency::Daily, anchor),
        RecurringSeries::expense("Insurance", 300.0, Frequency::Quarterly, anchor),
        RecurringSeries::income("Side gig", 75.0, Frequency::Weekly, anchor),
    ];
    let union: Vec<_> = left.iter().chain(right.iter()).cloned().collect();
    for offset in 0..12 {
        let target = month(2024, 1).offset(offset);
        assert_eq!(
            aggregate(&left, target) + aggregate(&right, target),
            aggregate(&union, target)
        );
    }
}

#[test]
fn paused_series_contribute_nothing() {
    let anchor = date(2024, 1, 1);
    for frequency in Frequency::ALL {
        let series = RecurringSeries::expense("Paused", 20.0, frequency, anchor).paused();
        let target = month(2024, 1);
        assert_eq!(count_in_month(&series, target), 0);
        assert!(project(&series, ProjectionWindow::month(target)).is_empty());
        assert_eq!(aggregate(std::slice::from_ref(&series), target).expense_total, 0.0);
    }
}

#[test]
fn same_day_series_share_one_cell() {
    let series = vec![
        RecurringSeries::income("Salary", 3000.0, Frequency::Monthly, date(2024, 1, 1)),
        RecurringSeries::expense("Rent", 1200.0, Frequency::Monthly, date(2024, 1, 1)),
    ];
    let grid = build(month(2024, 4), &series);
    let first = grid.cell(date(2024, 4, 1)).unwrap();
    assert_eq!(first.occurrences.len(), 2);
    assert_eq!(first.daily_total, 1800.0);
    assert_eq!(grid.weeks.len(), 6);
    assert!(grid.weeks.iter().all(|week| week.len() == 7));
    assert!(grid
        .cells()
        .filter(|cell| !cell.in_month)
        .all(|cell| cell.occurrences.is_empty() && cell.day.is_none()));
}

#[test]
fn unknown_frequency_degrades_to_nothing_counted() {
    let series = RecurringSeries::expense(
        "Mystery",
        30.0,
        Frequency::from_label("fortnightly-ish"),
        date(2024, 2, 9),
    );
    assert!(!series.frequency.is_known());
    assert_eq!(count_in_month(&series, month(2024, 2)), 0);
    assert_eq!(aggregate(std::slice::from_ref(&series), month(2024, 2)).expense_total, 0.0);
}
