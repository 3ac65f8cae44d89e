//! Invoice error types.

use feeledger_shared::AppError;
use feeledger_shared::types::InvoiceId;
use thiserror::Error;

/// Errors raised by invoice state changes and filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    /// Invoice does not exist.
    #[error("Invoice not found: {0}")]
    NotFound(InvoiceId),

    /// Invoice is already void.
    #[error("Invoice {0} is already void")]
    AlreadyVoid(InvoiceId),

    /// Invoice has payments recorded against it.
    #[error("Invoice {0} has recorded payments and cannot be voided")]
    HasPayments(InvoiceId),

    /// Status filter is not a known status.
    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        let message = err.to_string();
        match err {
            InvoiceError::NotFound(_) => Self::NotFound(message),
            InvoiceError::AlreadyVoid(_) | InvoiceError::HasPayments(_) => {
                Self::FailedPrecondition(message)
            }
            InvoiceError::UnknownStatus(_) => Self::InvalidArgument(message),
        }
    }
}

impl From<super::status::UnknownStatus> for InvoiceError {
    fn from(err: super::status::UnknownStatus) -> Self {
        Self::UnknownStatus(err.0)
    }
}
