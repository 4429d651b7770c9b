use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::Frequency;

/// A recurring income, expense or debt payment definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringSeries {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
    /// Positive for income, negative for expenses and debt payments.
    pub amount: f64,
    pub frequency: Frequency,
    /// Phase reference for every frequency rule (the "next date" of the series).
    pub anchor_date: NaiveDate,
    #[serde(default)]
    pub status: SeriesStatus,
    pub kind: SeriesKind,
    /// Owning debt record, set only for `debt_payment` series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_id: Option<Uuid>,
}

impl RecurringSeries {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        anchor_date: NaiveDate,
        kind: SeriesKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: String::new(),
            payment_method: String::new(),
            amount,
            frequency,
            anchor_date,
            status: SeriesStatus::Active,
            kind,
            debt_id: None,
        }
    }

    pub fn income(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        anchor: NaiveDate,
    ) -> Self {
        Self::new(name, amount.abs(), frequency, anchor, SeriesKind::Income)
    }

    pub fn expense(
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
        anchor: NaiveDate,
    ) -> Self {
        Self::new(name, -amount.abs(), frequency, anchor, SeriesKind::Expense)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    pub fn paused(mut self) -> Self {
        self.status = SeriesStatus::Paused;
        self
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, SeriesStatus::Active)
    }

    pub fn is_debt_payment(&self) -> bool {
        matches!(self.kind, SeriesKind::DebtPayment)
    }

    /// Whether the amount sign agrees with the kind (zero is accepted for any kind).
    pub fn sign_matches_kind(&self) -> bool {
        match self.kind {
            SeriesKind::Income => self.amount >= 0.0,
            SeriesKind::Expense | SeriesKind::DebtPayment => self.amount <= 0.0,
        }
    }

    pub fn occurrence(&self, date: NaiveDate) -> Occurrence {
        Occurrence {
            series_id: self.id,
            date,
            amount: self.amount,
            kind: self.kind,
            is_projected: date != self.anchor_date,
            is_historical: date < self.anchor_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    #[default]
    Active,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Income,
    Expense,
    DebtPayment,
}

/// One dated instance of a series. Derived on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occurrence {
    pub series_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: SeriesKind,
    /// False only when `date` is the series' stored anchor date.
    pub is_projected: bool,
    /// A projected instance dated before the anchor, derived backwards.
    pub is_historical: bool,
}
