//! Property-based tests for the invoice aggregator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::InvoiceAggregator;
use super::status::InvoiceStatus;

/// Strategy to generate non-negative amounts (0.00 to 100,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Unpaid),
        Just(InvoiceStatus::Partial),
        Just(InvoiceStatus::Paid),
        Just(InvoiceStatus::Void),
    ]
}

proptest! {
    /// balance == billed_total - paid_total for any inputs.
    #[test]
    fn prop_balance_is_billed_minus_paid(billed in amount(), paid in amount()) {
        let totals = InvoiceAggregator::recompute(billed, paid);
        prop_assert_eq!(totals.balance, totals.billed_total - totals.paid_total);
    }

    /// Status follows the derivation rule exactly.
    #[test]
    fn prop_status_matches_rule(billed in amount(), paid in amount()) {
        let totals = InvoiceAggregator::recompute(billed, paid);
        let expected = if paid == Decimal::ZERO {
            InvoiceStatus::Unpaid
        } else if paid < billed {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Paid
        };
        prop_assert_eq!(totals.status, expected);
    }

    /// Applying a sequence of payments that never exceed the balance keeps the
    /// invariant and ends PAID exactly when the balance reaches zero.
    #[test]
    fn prop_payments_within_balance_keep_invariant(
        billed in 1i64..1_000_000i64,
        splits in proptest::collection::vec(1i64..1_000i64, 1..10),
    ) {
        let mut totals = InvoiceAggregator::new_invoice(Decimal::new(billed, 2));
        for split in splits {
            let amount = Decimal::new(split, 2).min(totals.balance);
            if amount <= Decimal::ZERO {
                break;
            }
            totals = InvoiceAggregator::apply_payment(&totals, amount);
            prop_assert_eq!(totals.balance, totals.billed_total - totals.paid_total);
            prop_assert!(totals.balance >= Decimal::ZERO);
            prop_assert_eq!(totals.status == InvoiceStatus::Paid, totals.balance == Decimal::ZERO);
        }
    }

    /// Void is never lost, and non-void statuses are always re-derived.
    #[test]
    fn prop_recompute_from_respects_void(current in status(), billed in amount(), paid in amount()) {
        let totals = InvoiceAggregator::recompute_from(current, billed, paid);
        if current == InvoiceStatus::Void {
            prop_assert_eq!(totals.status, InvoiceStatus::Void);
        } else {
            prop_assert_eq!(totals.status, InvoiceAggregator::derive_status(billed, paid));
        }
    }
}
