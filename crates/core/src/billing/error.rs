//! Billing error types.

use feeledger_shared::AppError;
use feeledger_shared::types::FeeHeadId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during invoice generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Class label missing or blank.
    #[error("Class is required")]
    MissingClass,

    /// Period is not `YYYY-MM` with a month of 01-12.
    #[error("Invalid period, expected YYYY-MM: {0}")]
    InvalidPeriod(String),

    /// Strategy string is not recognised.
    #[error("Unknown generation strategy: {0}")]
    UnknownStrategy(String),

    /// `CUSTOM_PER_CLASS` without any head override.
    #[error("Strategy CUSTOM_PER_CLASS requires a non-empty head list")]
    OverrideRequired,

    /// The same head appears twice in the override list.
    #[error("Duplicate fee head in override: {0}")]
    DuplicateHead(FeeHeadId),

    /// Override references a head that does not exist.
    #[error("Fee head not found: {0}")]
    UnknownHead(FeeHeadId),

    /// Override references an inactive head.
    #[error("Fee head {0} is inactive")]
    InactiveHead(FeeHeadId),

    /// Override amount below zero.
    #[error("Fee head {head_id} amount must not be negative: {amount}")]
    NegativeAmount {
        /// Offending head.
        head_id: FeeHeadId,
        /// Offending amount.
        amount: Decimal,
    },

    /// No head to bill.
    #[error("No active fee heads to bill")]
    NoActiveHeads,

    /// The class has no students.
    #[error("No students found in class {0}")]
    NoStudents(String),
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        let message = err.to_string();
        match err {
            BillingError::NoStudents(_) => Self::NotFound(message),
            _ => Self::InvalidArgument(message),
        }
    }
}
