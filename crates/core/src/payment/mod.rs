//! Payment recording rules.
//!
//! Everything that can be decided without the database lives here:
//! request validation, the checks against a locked invoice, and receipt
//! number formatting. The db crate runs these inside its transaction.

pub mod error;
pub mod receipt;
pub mod types;
pub mod validation;

#[cfg(test)]
mod receipt_props;

pub use error::PaymentError;
pub use receipt::{RECEIPT_PREFIX, ReceiptNumber};
pub use types::{PaymentMode, PaymentRequest, ValidatedPayment};
pub use validation::PaymentValidator;
