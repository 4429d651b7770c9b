//! Plain-text layouts for totals, calendars, and occurrence lists.
//!
//! Each line carries the signed amount it reports so the caller can colour it.

use std::collections::HashMap;

use uuid::Uuid;

use crate::schedule::{
    CalendarGrid, MonthRef, MonthlyTotals, Occurrence, RecurringSeries, WeekStart,
};

const UNKNOWN_SERIES: &str = "(deleted series)";

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Signed amount behind the line; zero for headings and layout rows.
    pub amount: f64,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            amount: 0.0,
        }
    }

    fn money(text: impl Into<String>, amount: f64) -> Self {
        Self {
            text: text.into(),
            amount,
        }
    }
}

/// Series names keyed by id, for labelling occurrences.
pub fn series_names(series_list: &[RecurringSeries]) -> HashMap<Uuid, String> {
    series_list
        .iter()
        .map(|series| (series.id, series.name.clone()))
        .collect()
}

pub fn format_amount(amount: f64) -> String {
    // `-0.00` reads as a debit.
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{amount:+.2}")
}

pub fn month_totals(month: MonthRef, totals: &MonthlyTotals) -> Vec<Line> {
    vec![
        Line::plain(format!("Totals for {month}")),
        Line::money(
            format!("  Income    {:>12}", format_amount(totals.income_total)),
            totals.income_total,
        ),
        Line::money(
            format!("  Expenses  {:>12}", format_amount(-totals.expense_total)),
            -totals.expense_total,
        ),
        Line::money(
            format!("  Debt      {:>12}", format_amount(-totals.debt_total)),
            -totals.debt_total,
        ),
        Line::money(
            format!("  Net       {:>12}", format_amount(totals.net())),
            totals.net(),
        ),
    ]
}

fn weekday_header(week_start: WeekStart) -> &'static str {
    match week_start {
        WeekStart::Sunday => " Su  Mo  Tu  We  Th  Fr  Sa",
        WeekStart::Monday => " Mo  Tu  We  Th  Fr  Sa  Su",
    }
}

/// Six rows of day numbers, `*` marking days with occurrences, then each such day's
/// total followed by its occurrences.
pub fn calendar(grid: &CalendarGrid, names: &HashMap<Uuid, String>) -> Vec<Line> {
    let mut lines = vec![
        Line::plain(format!("Calendar for {}", grid.month)),
        Line::plain(weekday_header(grid.week_start)),
    ];
    for week in &grid.weeks {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell.day {
                Some(day) if !cell.occurrences.is_empty() => format!("{day:>3}*"),
                Some(day) => format!("{day:>3} "),
                None => "    ".to_string(),
            })
            .collect();
        lines.push(Line::plain(row.concat().trim_end().to_string()));
    }

    for cell in grid.in_month_cells().filter(|cell| !cell.occurrences.is_empty()) {
        lines.push(Line::money(
            format!("{}  daily total {:>12}", cell.date, format_amount(cell.daily_total)),
            cell.daily_total,
        ));
        for occurrence in &cell.occurrences {
            let mut line = occurrence_line(occurrence, names);
            line.text = format!("    {}", line.text);
            lines.push(line);
        }
    }
    lines.push(Line::money(
        format!("Net for month: {}", format_amount(grid.monthly_net())),
        grid.monthly_net(),
    ));
    lines
}

pub fn upcoming(occurrences: &[Occurrence], names: &HashMap<Uuid, String>) -> Vec<Line> {
    occurrences
        .iter()
        .map(|occurrence| occurrence_line(occurrence, names))
        .collect()
}

pub fn forecast(rows: &[(MonthRef, MonthlyTotals)]) -> Vec<Line> {
    let mut lines = vec![Line::plain(format!(
        "{:<8} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Income", "Expenses", "Debt", "Net"
    ))];
    for (month, totals) in rows {
        lines.push(Line::money(
            format!(
                "{:<8} {:>12.2} {:>12.2} {:>12.2} {:>12}",
                month.to_string(),
                totals.income_total,
                totals.expense_total,
                totals.debt_total,
                format_amount(totals.net())
            ),
            totals.net(),
        ));
    }
    let overall: MonthlyTotals = rows.iter().map(|(_, totals)| *totals).sum();
    lines.push(Line::money(
        format!("Overall net: {}", format_amount(overall.net())),
        overall.net(),
    ));
    lines
}

fn occurrence_line(occurrence: &Occurrence, names: &HashMap<Uuid, String>) -> Line {
    let name = names
        .get(&occurrence.series_id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_SERIES);
    let marker = if !occurrence.is_projected {
        " (scheduled)"
    } else if occurrence.is_historical {
        " (before start)"
    } else {
        ""
    };
    Line::money(
        format!(
            "{}  {:<24} {:>12}{marker}",
            occurrence.date,
            name,
            format_amount(occurrence.amount)
        ),
        occurrence.amount,
    )
}
