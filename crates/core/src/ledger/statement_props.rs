//! Property-based tests for ledger statements.

use chrono::{Duration, TimeZone, Utc};
use feeledger_shared::types::{InvoiceId, PaymentId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::statement::LedgerBuilder;
use super::types::{InvoiceCharge, PaymentCredit};
use crate::payment::PaymentMode;

fn charges() -> impl Strategy<Value = Vec<InvoiceCharge>> {
    let row = (1i64..1_000_000i64, 0i64..365, proptest::option::of(0i64..30));
    proptest::collection::vec(row, 0..8).prop_map(|rows| {
        rows.into_iter()
            .map(|(cents, day, voided_after)| {
                let created_at =
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
                InvoiceCharge {
                    invoice_id: InvoiceId::new(),
                    period: "2024-01".to_string(),
                    billed_total: Decimal::new(cents, 2),
                    created_at,
                    voided_at: voided_after.map(|days| created_at + Duration::days(days)),
                }
            })
            .collect()
    })
}

fn credits() -> impl Strategy<Value = Vec<PaymentCredit>> {
    proptest::collection::vec((1i64..1_000_000i64, 0i64..365), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (cents, day))| PaymentCredit {
                payment_id: PaymentId::new(),
                amount: Decimal::new(cents, 2),
                mode: PaymentMode::Cash,
                txn_ref: None,
                paid_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day),
                receipt_number: format!("REC-2024-01-{:06}", i + 1),
            })
            .collect()
    })
}

proptest! {
    /// Closing balance equals live charges minus credits; voids net to zero.
    #[test]
    fn prop_closing_is_charges_minus_credits(invoices in charges(), payments in credits()) {
        let charged: Decimal = invoices
            .iter()
            .filter(|i| i.voided_at.is_none())
            .map(|i| i.billed_total)
            .sum();
        let credited: Decimal = payments.iter().map(|p| p.amount).sum();
        let lines = invoices.len()
            + invoices.iter().filter(|i| i.voided_at.is_some()).count()
            + payments.len();
        let statement = LedgerBuilder::build(invoices, payments);
        prop_assert_eq!(statement.entries.len(), lines);
        prop_assert_eq!(statement.closing_balance, charged - credited);
    }

    /// Entries are date ordered and each running balance adds the line amount.
    #[test]
    fn prop_running_balance_accumulates(invoices in charges(), payments in credits()) {
        let statement = LedgerBuilder::build(invoices, payments);
        let mut previous = statement.opening_balance;
        for pair in statement.entries.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
        for entry in &statement.entries {
            prop_assert_eq!(entry.running_balance, previous + entry.amount);
            previous = entry.running_balance;
        }
    }
}
