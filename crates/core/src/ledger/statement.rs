//! Statement construction.

use feeledger_shared::types::round_money;
use rust_decimal::Decimal;

use super::types::{EntryKind, InvoiceCharge, LedgerEntry, LedgerStatement, PaymentCredit};

/// Prefix of invoice references on a ledger.
pub const INVOICE_REFERENCE_PREFIX: &str = "INV";

fn invoice_reference(invoice: &InvoiceCharge) -> String {
    format!("{INVOICE_REFERENCE_PREFIX}-{}", invoice.invoice_id)
}

/// Builds ledger statements.
pub struct LedgerBuilder;

impl LedgerBuilder {
    /// Builds a statement from a student's invoices and payments.
    ///
    /// A voided invoice contributes its charge and an offsetting void line.
    /// Entries are ordered by date, then kind (invoice, payment, void), then
    /// reference. The running balance starts at zero.
    #[must_use]
    pub fn build(invoices: Vec<InvoiceCharge>, payments: Vec<PaymentCredit>) -> LedgerStatement {
        let mut entries: Vec<LedgerEntry> = invoices
            .iter()
            .flat_map(|invoice| {
                std::iter::once(Self::charge_entry(invoice)).chain(Self::void_entry(invoice))
            })
            .chain(payments.into_iter().map(Self::credit_entry))
            .collect();

        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.reference.cmp(&b.reference))
        });

        let opening_balance = round_money(Decimal::ZERO);
        let mut running = opening_balance;
        for entry in &mut entries {
            running = round_money(running + entry.amount);
            entry.running_balance = running;
        }

        LedgerStatement {
            entries,
            opening_balance,
            closing_balance: running,
        }
    }

    fn charge_entry(invoice: &InvoiceCharge) -> LedgerEntry {
        LedgerEntry {
            date: invoice.created_at,
            kind: EntryKind::Invoice,
            description: format!("Invoice for {}", invoice.period),
            reference: invoice_reference(invoice),
            amount: round_money(invoice.billed_total),
            running_balance: Decimal::ZERO,
        }
    }

    fn void_entry(invoice: &InvoiceCharge) -> Option<LedgerEntry> {
        let voided_at = invoice.voided_at?;
        Some(LedgerEntry {
            date: voided_at,
            kind: EntryKind::Void,
            description: format!("Invoice for {} voided", invoice.period),
            reference: invoice_reference(invoice),
            amount: -round_money(invoice.billed_total),
            running_balance: Decimal::ZERO,
        })
    }

    fn credit_entry(payment: PaymentCredit) -> LedgerEntry {
        let description = match &payment.txn_ref {
            Some(txn_ref) => format!("Payment - {} ({txn_ref})", payment.mode),
            None => format!("Payment - {}", payment.mode),
        };
        LedgerEntry {
            date: payment.paid_on,
            kind: EntryKind::Payment,
            description,
            reference: payment.receipt_number,
            amount: -round_money(payment.amount),
            running_balance: Decimal::ZERO,
        }
    }
}
