//! Student ledger statements.
//!
//! A statement interleaves invoice charges and payment credits in date order
//! and carries a running balance starting from zero.

pub mod statement;
pub mod types;

#[cfg(test)]
mod statement_props;

pub use statement::LedgerBuilder;
pub use types::*;
