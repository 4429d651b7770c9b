use std::{env, path::PathBuf, process};

use cashflow_core::{
    cli::{output, render},
    config::{ConfigManager, MAX_FORECAST_MONTHS, MAX_UPCOMING_DAYS},
    core::{services::SummaryService, time::SystemClock},
    init,
    schedule::MonthRef,
    storage::{JsonSeriesStore, SeriesStore},
    utils::build_info,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (file, mut args) = split_file_flag(env::args().skip(1))?;
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    if command == "version" {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let store = JsonSeriesStore::new(file.unwrap_or_else(|| manager.series_file(&config)));
    tracing::debug!(path = %store.path().display(), "using series file");
    if !store.path().exists() {
        output::warning(format!("no series file at {}", store.path().display()));
    }

    let lines = match command.as_str() {
        "month" => {
            let month = month_arg(args.next())?;
            render::month_totals(month, &SummaryService::month_totals(&store, month)?)
        }
        "calendar" => {
            let month = month_arg(args.next())?;
            let grid = SummaryService::calendar(&store, month, config.week_start)?;
            render::calendar(&grid, &render::series_names(&store.list()?))
        }
        "upcoming" => {
            let days = match args.next() {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| format!("days must be a whole number, got `{raw}`"))?,
                None => config.upcoming_days,
            };
            at_most(days, MAX_UPCOMING_DAYS, "days")?;
            let occurrences = SummaryService::upcoming(&store, &SystemClock, days)?;
            if occurrences.is_empty() {
                output::info(format!("Nothing due in the next {days} days."));
                return Ok(());
            }
            render::upcoming(&occurrences, &render::series_names(&store.list()?))
        }
        "forecast" => {
            let start = month_arg(args.next())?;
            let months = match args.next() {
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| format!("month count must be a whole number, got `{raw}`"))?,
                None => {
                    print_usage();
                    process::exit(1);
                }
            };
            at_most(months, MAX_FORECAST_MONTHS, "month count")?;
            render::forecast(&SummaryService::forecast(&store, start, months)?)
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    };

    if let Some((title, rest)) = lines.split_first() {
        output::section(&title.text);
        for line in rest {
            output::amount_line(line.amount, &line.text);
        }
    }
    Ok(())
}

/// Removes `--file <path>` from anywhere in the argument list.
fn split_file_flag(
    mut args: impl Iterator<Item = String>,
) -> Result<(Option<PathBuf>, std::vec::IntoIter<String>), String> {
    let mut file = None;
    let mut rest = Vec::new();
    while let Some(arg) = args.next() {
        if arg == "--file" {
            let path = args.next().ok_or("--file requires a path")?;
            file = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }
    Ok((file, rest.into_iter()))
}

fn at_most(value: u32, max: u32, what: &str) -> Result<(), String> {
    if value > max {
        return Err(format!("{what} must be at most {max}, got {value}"));
    }
    Ok(())
}

fn month_arg(raw: Option<String>) -> Result<MonthRef, Box<dyn std::error::Error>> {
    match raw {
        Some(raw) => Ok(raw.parse::<MonthRef>()?),
        None => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: cashflow_cli [--file <series.json>] <command>\n\
         Commands:\n  \
         month <YYYY-MM>\n  \
         calendar <YYYY-MM>\n  \
         upcoming [days]\n  \
         forecast <YYYY-MM> <months>\n  \
         version"
    );
}
