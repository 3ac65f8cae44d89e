//! Invoice state.
//!
//! An invoice's `balance` and `status` are derived from its billed and paid
//! totals. [`InvoiceAggregator`] is the only place that derivation happens.

pub mod aggregate;
pub mod error;
pub mod status;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::{InvoiceAggregator, InvoiceTotals};
pub use error::InvoiceError;
pub use status::{InvoiceStatus, UnknownStatus};
