//! Payment error types.

use feeledger_shared::AppError;
use feeledger_shared::types::InvoiceId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    // ========== Request Errors ==========
    /// Amount is zero or negative.
    #[error("Payment amount must be greater than 0")]
    NonPositiveAmount,

    /// Amount is positive but rounds to 0.00.
    #[error("Payment amount {0} rounds to 0.00")]
    AmountRoundsToZero(Decimal),

    /// Mode string is not one of the known modes.
    #[error("Unknown payment mode: {0}")]
    UnknownMode(String),

    /// Non-cash payment without a transaction reference.
    #[error("Transaction reference is required for {0} payments")]
    MissingTxnRef(String),

    /// `paid_on` is neither an RFC 3339 timestamp nor a `YYYY-MM-DD` date.
    #[error("Invalid paid_on value: {0}")]
    InvalidPaidOn(String),

    // ========== Invoice State Errors ==========
    /// Invoice does not exist.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Invoice was voided.
    #[error("Invoice {0} is void and cannot accept payments")]
    InvoiceVoid(InvoiceId),

    /// Amount is larger than the remaining balance.
    #[error("Payment amount {amount} exceeds invoice balance {balance}")]
    ExceedsBalance {
        /// Requested amount.
        amount: Decimal,
        /// Balance at the time the invoice was locked.
        balance: Decimal,
    },

    // ========== Duplicate Errors ==========
    /// The idempotency key was already consumed.
    #[error("Idempotency key already used: {0}")]
    DuplicateIdempotencyKey(String),

    /// The transaction reference is already attached to a payment.
    #[error("Transaction reference already used: {0}")]
    DuplicateTxnRef(String),

    // ========== Sequence Errors ==========
    /// Receipt counter returned a value that cannot be issued.
    #[error("Receipt counter returned invalid value {0}")]
    InvalidCounter(i64),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let message = err.to_string();
        match err {
            PaymentError::NonPositiveAmount
            | PaymentError::AmountRoundsToZero(_)
            | PaymentError::UnknownMode(_)
            | PaymentError::MissingTxnRef(_)
            | PaymentError::InvalidPaidOn(_)
            | PaymentError::ExceedsBalance { .. } => Self::InvalidArgument(message),
            PaymentError::InvoiceNotFound(_) => Self::NotFound(message),
            PaymentError::InvoiceVoid(_) => Self::FailedPrecondition(message),
            PaymentError::DuplicateIdempotencyKey(_) | PaymentError::DuplicateTxnRef(_) => {
                Self::AlreadyExists(message)
            }
            PaymentError::InvalidCounter(_) => Self::Internal(message),
        }
    }
}
