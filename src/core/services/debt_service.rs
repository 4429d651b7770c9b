//! Keeps each debt's payment series in step with the debt record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::series_service::validate;
use crate::core::services::{ServiceError, ServiceResult};
use crate::core::time::Clock;
use crate::schedule::{Frequency, MonthRef, RecurringSeries, SeriesKind};
use crate::storage::SeriesStore;

const DUE_DATE_SEARCH_MONTHS: i64 = 12;

/// The fields of a debt that drive its payment series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub id: Uuid,
    pub name: String,
    /// Minimum monthly payment as a positive amount.
    pub minimum_payment: f64,
    /// Day of month the payment is due (1-31).
    pub due_day: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
}

impl DebtRecord {
    pub fn new(name: impl Into<String>, minimum_payment: f64, due_day: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            minimum_payment,
            due_day,
            category: "Debt".into(),
            payment_method: String::new(),
        }
    }
}

pub struct DebtSyncService;

impl DebtSyncService {
    /// Creates or refreshes the single payment series linked to `debt`.
    ///
    /// Called whenever a debt is created or its minimum payment or due day changes.
    /// The anchor only moves when the due day changes, so the series keeps its phase.
    pub fn sync<S: SeriesStore + ?Sized>(
        store: &mut S,
        debt: &DebtRecord,
        clock: &dyn Clock,
    ) -> ServiceResult<RecurringSeries> {
        validate_debt(debt)?;
        let mut linked = Self::linked(store, debt.id)?;
        let existing = if linked.is_empty() {
            None
        } else {
            Some(linked.remove(0))
        };
        for duplicate in linked {
            store.delete(duplicate.id)?;
            tracing::warn!(
                debt = %debt.id,
                series = %duplicate.id,
                "removed duplicate debt payment series"
            );
        }

        let series = match existing {
            Some(mut series) => {
                series.name = debt.name.clone();
                series.amount = -debt.minimum_payment;
                series.category = debt.category.clone();
                series.payment_method = debt.payment_method.clone();
                series.frequency = Frequency::Monthly;
                if series.anchor_date.day() != debt.due_day {
                    series.anchor_date = next_due_date(clock.today(), debt.due_day);
                }
                series
            }
            None => {
                let mut series = RecurringSeries::new(
                    debt.name.clone(),
                    -debt.minimum_payment,
                    Frequency::Monthly,
                    next_due_date(clock.today(), debt.due_day),
                    SeriesKind::DebtPayment,
                )
                .with_category(debt.category.clone())
                .with_payment_method(debt.payment_method.clone());
                series.debt_id = Some(debt.id);
                series
            }
        };

        validate(&series)?;
        store.save(&series)?;
        tracing::info!(
            debt = %debt.id,
            series = %series.id,
            anchor = %series.anchor_date,
            "debt payment series synced"
        );
        Ok(series)
    }

    /// Deletes every series linked to the debt. Returns how many were removed.
    pub fn remove_debt<S: SeriesStore + ?Sized>(
        store: &mut S,
        debt_id: Uuid,
    ) -> ServiceResult<usize> {
        let mut removed = 0;
        for series in Self::linked(store, debt_id)? {
            if store.delete(series.id)? {
                removed += 1;
            }
        }
        tracing::info!(debt = %debt_id, removed, "debt payment series removed");
        Ok(removed)
    }

    pub fn linked<S: SeriesStore + ?Sized>(
        store: &S,
        debt_id: Uuid,
    ) -> ServiceResult<Vec<RecurringSeries>> {
        Ok(store
            .list()?
            .into_iter()
            .filter(|series| series.is_debt_payment() && series.debt_id == Some(debt_id))
            .collect())
    }
}

fn validate_debt(debt: &DebtRecord) -> ServiceResult<()> {
    if !(1..=31).contains(&debt.due_day) {
        return Err(ServiceError::Invalid(format!(
            "due day {} must be between 1 and 31",
            debt.due_day
        )));
    }
    if !debt.minimum_payment.is_finite() || debt.minimum_payment < 0.0 {
        return Err(ServiceError::Invalid(
            "minimum payment must be zero or positive".into(),
        ));
    }
    Ok(())
}

/// First date on or after `today` whose day of month is `due_day`.
fn next_due_date(today: NaiveDate, due_day: u32) -> NaiveDate {
    let current = MonthRef::of(today);
    (0..DUE_DATE_SEARCH_MONTHS)
        .filter_map(|offset| current.offset(offset).day(due_day))
        .find(|date| *date >= today)
        .unwrap_or_else(|| current.day_clamped(due_day))
}
