use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating input, simulating or persisting accounts.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("account \"{name}\" has a negative balance ({value})")]
    NegativeBalance { name: String, value: Decimal },
    #[error("account \"{name}\" has a negative APR ({value})")]
    NegativeApr { name: String, value: Decimal },
    #[error("account \"{name}\" has a negative minimum payment ({value})")]
    NegativeMinimumPayment { name: String, value: Decimal },
    #[error("extra payment cannot be negative ({0})")]
    NegativeExtraPayment(Decimal),
    #[error("no account with id {0}")]
    AccountNotFound(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PlanError {
    /// True for the kinds produced by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlanError::NegativeBalance { .. }
                | PlanError::NegativeApr { .. }
                | PlanError::NegativeMinimumPayment { .. }
                | PlanError::NegativeExtraPayment(_)
        )
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
