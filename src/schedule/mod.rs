//! Recurring series definitions and the pure occurrence engine built on them.
//!
//! Everything in this module is synchronous and side-effect free: callers pass a
//! snapshot of series and a month or window and receive a fresh result.

pub mod aggregate;
pub mod counter;
pub mod frequency;
pub mod grid;
pub mod month;
pub mod projector;
pub mod series;

pub use aggregate::{aggregate, estimate_monthly, estimate_totals, forecast, MonthlyTotals};
pub use counter::count_in_month;
pub use frequency::{step_of, DayOverflow, Frequency, Step, StepRule, TimeUnit};
pub use grid::{build, build_with, CalendarGrid, DayCell, WeekStart};
pub use month::{days_in_month, MonthRef};
pub use projector::{expand_month, project, upcoming, ProjectionWindow};
pub use series::{Occurrence, RecurringSeries, SeriesKind, SeriesStatus};
