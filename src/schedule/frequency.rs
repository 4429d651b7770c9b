use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::month::MonthRef;

/// How often a recurring series repeats.
///
/// The set is closed; labels outside it are kept verbatim in [`Frequency::Other`] so
/// that a stored series round-trips, and are treated as a one-off on the anchor date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Month,
    Year,
}

/// What a month or year step does when the anchor day does not exist in the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOverflow {
    Skip,
    Clamp,
}

/// A fixed step: every `every` units from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRule {
    pub every: u32,
    pub unit: TimeUnit,
    pub overflow: DayOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fixed(StepRule),
    /// The 1st and the 15th of every month, regardless of the anchor day.
    SemiMonthly,
    /// Unknown label: the anchor date only.
    Once,
}

pub const SEMI_MONTHLY_DAYS: [u32; 2] = [1, 15];

impl Frequency {
    pub const ALL: [Frequency; 8] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::SemiMonthly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnually,
        Frequency::Annually,
    ];

    /// Parses a label, tolerating case and `-`/`_`/space separators.
    pub fn from_label(label: &str) -> Frequency {
        let key: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::BiWeekly,
            "semimonthly" => Frequency::SemiMonthly,
            "monthly" => Frequency::Monthly,
            "quarterly" => Frequency::Quarterly,
            "semiannually" => Frequency::SemiAnnually,
            "annually" | "yearly" => Frequency::Annually,
            _ => Frequency::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi-weekly",
            Frequency::SemiMonthly => "semi-monthly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnually => "semi-annually",
            Frequency::Annually => "annually",
            Frequency::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Frequency::Other(_))
    }

    pub fn step(&self) -> Step {
        let fixed = |every, unit, overflow| {
            Step::Fixed(StepRule {
                every,
                unit,
                overflow,
            })
        };
        match self {
            Frequency::Daily => fixed(1, TimeUnit::Day, DayOverflow::Skip),
            Frequency::Weekly => fixed(7, TimeUnit::Day, DayOverflow::Skip),
            Frequency::BiWeekly => fixed(14, TimeUnit::Day, DayOverflow::Skip),
            Frequency::SemiMonthly => Step::SemiMonthly,
            Frequency::Monthly => fixed(1, TimeUnit::Month, DayOverflow::Skip),
            Frequency::Quarterly => fixed(3, TimeUnit::Month, DayOverflow::Clamp),
            Frequency::SemiAnnually => fixed(6, TimeUnit::Month, DayOverflow::Clamp),
            Frequency::Annually => fixed(1, TimeUnit::Year, DayOverflow::Clamp),
            Frequency::Other(_) => Step::Once,
        }
    }

    /// Approximate occurrences per month, for summaries that do not count a real month.
    pub fn monthly_multiplier(&self) -> f64 {
        match self {
            Frequency::Daily => 30.0,
            Frequency::Weekly => 4.33,
            Frequency::BiWeekly => 2.17,
            Frequency::SemiMonthly => 2.0,
            Frequency::Monthly => 1.0,
            Frequency::Quarterly => 1.0 / 3.0,
            Frequency::SemiAnnually => 1.0 / 6.0,
            Frequency::Annually => 1.0 / 12.0,
            Frequency::Other(_) => 0.0,
        }
    }
}

/// Step semantics for a frequency label.
pub fn step_of(frequency: &Frequency) -> Step {
    frequency.step()
}

impl StepRule {
    /// Size of one step in the rule's position scale (days, or months for month/year units).
    fn span(&self) -> i64 {
        match self.unit {
            TimeUnit::Day | TimeUnit::Month => self.every as i64,
            TimeUnit::Year => self.every as i64 * 12,
        }
    }

    /// Position of a date on the rule's scale: day number or month index.
    pub(crate) fn position(&self, date: NaiveDate) -> i64 {
        match self.unit {
            TimeUnit::Day => date.num_days_from_ce() as i64,
            TimeUnit::Month | TimeUnit::Year => MonthRef::of(date).index(),
        }
    }

    /// Largest step index whose position does not exceed `date`'s position.
    pub(crate) fn index_at_or_before(&self, anchor: NaiveDate, date: NaiveDate) -> i64 {
        (self.position(date) - self.position(anchor)).div_euclid(self.span())
    }

    /// Position of the `k`-th step, whether or not the date exists.
    pub(crate) fn position_of(&self, anchor: NaiveDate, k: i64) -> i64 {
        self.position(anchor) + k * self.span()
    }

    /// The `k`-th occurrence counted from the anchor (negative `k` walks backwards).
    /// `None` when the step lands on a month without the anchor day and overflow skips.
    pub fn nth(&self, anchor: NaiveDate, k: i64) -> Option<NaiveDate> {
        match self.unit {
            TimeUnit::Day => anchor.checked_add_signed(Duration::days(k * self.span())),
            TimeUnit::Month | TimeUnit::Year => {
                let month = MonthRef::of(anchor).offset(k * self.span());
                match self.overflow {
                    DayOverflow::Skip => month.day(anchor.day()),
                    DayOverflow::Clamp => Some(month.day_clamped(anchor.day())),
                }
            }
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        Frequency::from_label(&value)
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
