//! Core business logic for Feeledger.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `invoice` - Invoice status derivation and the totals aggregator
//! - `payment` - Payment validation and receipt numbering
//! - `billing` - Billing periods and fee-head resolution for invoice generation
//! - `ledger` - Per-student running-balance statements
//! - `reports` - Collection report aggregation
//! - `student` - Student read model shared by the views

pub mod billing;
pub mod invoice;
pub mod ledger;
pub mod payment;
pub mod reports;
pub mod student;
