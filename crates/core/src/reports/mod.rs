//! Fee collection reports.
//!
//! This module provides pure business logic for the collection report:
//! - Summary (billed, collected, outstanding)
//! - Breakdown by class
//! - Breakdown by fee head, with collections apportioned per invoice

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
