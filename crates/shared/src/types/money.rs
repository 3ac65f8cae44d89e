//! Currency rounding policy.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal` rounded to [`MONEY_SCALE`]
//! places, half away from zero. Inputs (payment amounts, fee-head amounts)
//! and derived values (totals, apportioned report figures) go through the
//! same function so stored and computed values never disagree.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to [`MONEY_SCALE`] places, half away from zero.
///
/// For the non-negative amounts the ledger deals in this is the familiar
/// round-half-up (`10.005 -> 10.01`).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Formats an amount with exactly [`MONEY_SCALE`] decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    round_money(amount).to_string()
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
