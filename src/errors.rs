use thiserror::Error;
use uuid::Uuid;

/// Error type that captures failures around series storage and policy checks.
///
/// Occurrence computations themselves never fail; only constructors taking raw
/// dates and the collaborator layers report errors.
#[derive(Debug, Error)]
pub enum CashflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Series not found: {0}")]
    NotFound(Uuid),
    #[error("Operation rejected: {0}")]
    PolicyViolation(String),
}

pub type Result<T> = std::result::Result<T, CashflowError>;
