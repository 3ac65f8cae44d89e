//! Invoice totals aggregation.
//!
//! Every write path that changes `billed_total` or `paid_total` must persist
//! the output of [`InvoiceAggregator`] so that
//! `balance == billed_total - paid_total` and `status` never drift.

use feeledger_shared::types::{InvoiceId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::status::InvoiceStatus;

/// Billed/paid/balance figures of an invoice together with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of the invoice's line items.
    pub billed_total: Decimal,
    /// Sum of payments recorded against the invoice.
    pub paid_total: Decimal,
    /// `billed_total - paid_total`.
    pub balance: Decimal,
    /// Derived status.
    pub status: InvoiceStatus,
}

/// Pure recomputation of invoice totals.
pub struct InvoiceAggregator;

impl InvoiceAggregator {
    /// Derives the status for the given totals.
    ///
    /// `UNPAID` when nothing is paid, `PARTIAL` when something but less than
    /// the billed total is paid, `PAID` otherwise.
    #[must_use]
    pub fn derive_status(billed_total: Decimal, paid_total: Decimal) -> InvoiceStatus {
        if paid_total <= Decimal::ZERO {
            InvoiceStatus::Unpaid
        } else if paid_total < billed_total {
            InvoiceStatus::Partial
        } else {
            InvoiceStatus::Paid
        }
    }

    /// Recomputes balance and status from billed and paid totals.
    #[must_use]
    pub fn recompute(billed_total: Decimal, paid_total: Decimal) -> InvoiceTotals {
        let billed_total = round_money(billed_total);
        let paid_total = round_money(paid_total);

        InvoiceTotals {
            billed_total,
            paid_total,
            balance: billed_total - paid_total,
            status: Self::derive_status(billed_total, paid_total),
        }
    }

    /// Recomputes totals for an invoice that already has a status.
    ///
    /// `VOID` is an administrative state, not a derived one, so it survives
    /// recomputation.
    #[must_use]
    pub fn recompute_from(
        current: InvoiceStatus,
        billed_total: Decimal,
        paid_total: Decimal,
    ) -> InvoiceTotals {
        let mut totals = Self::recompute(billed_total, paid_total);
        if current == InvoiceStatus::Void {
            totals.status = InvoiceStatus::Void;
        }
        totals
    }

    /// Totals after adding a payment of `amount` to `current`.
    #[must_use]
    pub fn apply_payment(current: &InvoiceTotals, amount: Decimal) -> InvoiceTotals {
        Self::recompute_from(current.status, current.billed_total, current.paid_total + amount)
    }

    /// Totals after voiding. Only an invoice with nothing paid can be voided.
    pub fn void(id: InvoiceId, current: &InvoiceTotals) -> Result<InvoiceTotals, InvoiceError> {
        if current.status == InvoiceStatus::Void {
            return Err(InvoiceError::AlreadyVoid(id));
        }
        if current.paid_total > Decimal::ZERO {
            return Err(InvoiceError::HasPayments(id));
        }
        Ok(InvoiceTotals {
            status: InvoiceStatus::Void,
            ..*current
        })
    }

    /// Totals of a freshly generated invoice.
    #[must_use]
    pub fn new_invoice(billed_total: Decimal) -> InvoiceTotals {
        Self::recompute(billed_total, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(5000), dec!(0), InvoiceStatus::Unpaid)]
    #[case(dec!(5000), dec!(0.01), InvoiceStatus::Partial)]
    #[case(dec!(5000), dec!(4999.99), InvoiceStatus::Partial)]
    #[case(dec!(5000), dec!(5000), InvoiceStatus::Paid)]
    #[case(dec!(4000), dec!(5000), InvoiceStatus::Paid)]
    #[case(dec!(0), dec!(0), InvoiceStatus::Unpaid)]
    fn test_derive_status(
        #[case] billed: Decimal,
        #[case] paid: Decimal,
        #[case] expected: InvoiceStatus,
    ) {
        assert_eq!(InvoiceAggregator::derive_status(billed, paid), expected);
    }

    #[test]
    fn test_payment_sequence_from_example() {
        let invoice = InvoiceAggregator::new_invoice(dec!(5000));
        assert_eq!(invoice.balance, dec!(5000));
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);

        let after_first = InvoiceAggregator::apply_payment(&invoice, dec!(2000));
        assert_eq!(after_first.paid_total, dec!(2000));
        assert_eq!(after_first.balance, dec!(3000));
        assert_eq!(after_first.status, InvoiceStatus::Partial);

        let after_second = InvoiceAggregator::apply_payment(&after_first, dec!(3000));
        assert_eq!(after_second.paid_total, dec!(5000));
        assert_eq!(after_second.balance, dec!(0));
        assert_eq!(after_second.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_void_survives_recompute() {
        let totals = InvoiceAggregator::recompute_from(InvoiceStatus::Void, dec!(1200), dec!(0));
        assert_eq!(totals.status, InvoiceStatus::Void);
        assert_eq!(totals.balance, dec!(1200));
    }

    #[test]
    fn test_regeneration_below_paid_marks_paid() {
        let totals = InvoiceAggregator::recompute_from(InvoiceStatus::Partial, dec!(1500), dec!(2000));
        assert_eq!(totals.status, InvoiceStatus::Paid);
        assert_eq!(totals.balance, dec!(-500));
    }

    #[test]
    fn test_void_rules() {
        let id = InvoiceId::new();
        let unpaid = InvoiceAggregator::new_invoice(dec!(5000));
        let voided = InvoiceAggregator::void(id, &unpaid).unwrap();
        assert_eq!(voided.status, InvoiceStatus::Void);
        assert_eq!(voided.balance, dec!(5000));

        assert_eq!(
            InvoiceAggregator::void(id, &voided),
            Err(InvoiceError::AlreadyVoid(id))
        );

        let partial = InvoiceAggregator::apply_payment(&unpaid, dec!(1));
        assert_eq!(
            InvoiceAggregator::void(id, &partial),
            Err(InvoiceError::HasPayments(id))
        );
    }

    #[test]
    fn test_totals_are_rounded() {
        let totals = InvoiceAggregator::recompute(dec!(100.005), dec!(0.004));
        assert_eq!(totals.billed_total, dec!(100.01));
        assert_eq!(totals.paid_total, dec!(0.00));
        assert_eq!(totals.status, InvoiceStatus::Unpaid);
    }
}
