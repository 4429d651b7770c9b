pub mod debt_service;
pub mod series_service;
pub mod summary_service;

pub use debt_service::{DebtRecord, DebtSyncService};
pub use series_service::SeriesService;
pub use summary_service::SummaryService;

use crate::errors::CashflowError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Cashflow(#[from] CashflowError),
    #[error("{0}")]
    Invalid(String),
}

impl ServiceError {
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, ServiceError::Cashflow(CashflowError::PolicyViolation(_)))
    }
}
