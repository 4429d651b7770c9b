#![doc(test(attr(deny(warnings))))]

//! Cashflow Core expands recurring income, expense, and debt payment series into
//! concrete dated occurrences, monthly totals, and calendar month grids.
//!
//! The occurrence engine in [`schedule`] is pure; [`storage`] and [`core::services`]
//! add persistence and the editing rules around it.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod schedule;
pub mod storage;
pub mod utils;

pub use errors::{CashflowError, Result};
pub use schedule::{
    CalendarGrid, Frequency, MonthRef, MonthlyTotals, Occurrence, RecurringSeries, SeriesKind,
    SeriesStatus,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow core tracing initialized.");
    });
}
