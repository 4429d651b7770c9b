//! Validated create/update/delete for recurring series.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::errors::CashflowError;
use crate::schedule::{RecurringSeries, SeriesKind, SeriesStatus};
use crate::storage::SeriesStore;

/// User-facing mutations of series. Debt payment series are owned by their debt record:
/// they cannot be created or deleted here, and only their descriptive fields and status
/// may be edited.
pub struct SeriesService;

impl SeriesService {
    pub fn list<S: SeriesStore + ?Sized>(store: &S) -> ServiceResult<Vec<RecurringSeries>> {
        Ok(store.list()?)
    }

    /// Stores a new series and returns its identifier.
    pub fn create<S: SeriesStore + ?Sized>(
        store: &mut S,
        series: RecurringSeries,
    ) -> ServiceResult<Uuid> {
        if series.is_debt_payment() {
            return Err(reject(
                "debt payment series are created from their debt record",
            ));
        }
        validate(&series)?;
        store.save(&series)?;
        tracing::info!(series = %series.id, name = %series.name, "series created");
        Ok(series.id)
    }

    /// Applies `mutator` to a copy of the stored series and saves the result.
    pub fn update<S, F>(store: &mut S, id: Uuid, mutator: F) -> ServiceResult<RecurringSeries>
    where
        S: SeriesStore + ?Sized,
        F: FnOnce(&mut RecurringSeries),
    {
        let current = store.get(id)?.ok_or(CashflowError::NotFound(id))?;
        let mut updated = current.clone();
        mutator(&mut updated);
        updated.id = current.id;

        if current.is_debt_payment() {
            if let Some(field) = locked_field_changed(&current, &updated) {
                return Err(reject(&format!(
                    "the {field} of debt payment `{}` can only change through its debt",
                    current.name
                )));
            }
        } else if updated.is_debt_payment() || updated.debt_id.is_some() {
            return Err(reject("a series cannot be turned into a debt payment"));
        }

        validate(&updated)?;
        store.save(&updated)?;
        tracing::info!(series = %id, "series updated");
        Ok(updated)
    }

    /// Pauses or resumes a series. Allowed for debt payments too.
    pub fn set_status<S: SeriesStore + ?Sized>(
        store: &mut S,
        id: Uuid,
        status: SeriesStatus,
    ) -> ServiceResult<RecurringSeries> {
        Self::update(store, id, |series| series.status = status)
    }

    /// Removes a series and returns it.
    pub fn delete<S: SeriesStore + ?Sized>(
        store: &mut S,
        id: Uuid,
    ) -> ServiceResult<RecurringSeries> {
        let current = store.get(id)?.ok_or(CashflowError::NotFound(id))?;
        if current.is_debt_payment() {
            return Err(reject(&format!(
                "debt payment `{}` is removed by deleting its debt",
                current.name
            )));
        }
        store.delete(id)?;
        tracing::info!(series = %id, name = %current.name, "series deleted");
        Ok(current)
    }
}

pub(crate) fn validate(series: &RecurringSeries) -> ServiceResult<()> {
    if series.name.trim().is_empty() {
        return Err(ServiceError::Invalid("series name must not be empty".into()));
    }
    if !series.amount.is_finite() {
        return Err(ServiceError::Invalid("series amount must be a finite number".into()));
    }
    if !series.sign_matches_kind() {
        let expected = match series.kind {
            SeriesKind::Income => "zero or positive",
            SeriesKind::Expense | SeriesKind::DebtPayment => "zero or negative",
        };
        return Err(ServiceError::Invalid(format!(
            "amount {} for `{}` must be {expected}",
            series.amount, series.name
        )));
    }
    if series.is_debt_payment() != series.debt_id.is_some() {
        return Err(ServiceError::Invalid(
            "only debt payment series carry a debt link".into(),
        ));
    }
    Ok(())
}

fn locked_field_changed(before: &RecurringSeries, after: &RecurringSeries) -> Option<&'static str> {
    if before.amount != after.amount {
        Some("amount")
    } else if before.anchor_date != after.anchor_date {
        Some("date")
    } else if before.frequency != after.frequency {
        Some("frequency")
    } else if before.kind != after.kind {
        Some("kind")
    } else if before.debt_id != after.debt_id {
        Some("debt link")
    } else {
        None
    }
}

fn reject(message: &str) -> ServiceError {
    tracing::warn!("{message}");
    ServiceError::from(CashflowError::PolicyViolation(message.to_string()))
}
