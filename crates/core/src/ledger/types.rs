//! Ledger types.

use chrono::{DateTime, Utc};
use feeledger_shared::types::{InvoiceId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payment::PaymentMode;
use crate::student::StudentSummary;

/// Kind of ledger line. On the same instant invoices sort first, then
/// payments, then voids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// A charge.
    Invoice,
    /// A credit.
    Payment,
    /// Reversal of a voided invoice's charge.
    Void,
}

/// An invoice as it appears on a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceCharge {
    /// Invoice id.
    pub invoice_id: InvoiceId,
    /// `YYYY-MM`.
    pub period: String,
    /// Amount charged.
    pub billed_total: Decimal,
    /// When the invoice was generated.
    pub created_at: DateTime<Utc>,
    /// When the invoice was voided, if it was.
    pub voided_at: Option<DateTime<Utc>>,
}

/// A payment as it appears on a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCredit {
    /// Payment id.
    pub payment_id: PaymentId,
    /// Amount received.
    pub amount: Decimal,
    /// Payment mode.
    pub mode: PaymentMode,
    /// External transaction reference.
    pub txn_ref: Option<String>,
    /// When the money was received.
    pub paid_on: DateTime<Utc>,
    /// Issued receipt number.
    pub receipt_number: String,
}

/// One line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Invoice `created_at`, payment `paid_on` or invoice `voided_at`.
    pub date: DateTime<Utc>,
    /// Line kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Human-readable description.
    pub description: String,
    /// `INV-<id>` for invoice and void lines, else the receipt number.
    pub reference: String,
    /// Signed amount: positive for charges, negative for payments and voids.
    pub amount: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
}

/// A complete statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Lines in date order.
    pub entries: Vec<LedgerEntry>,
    /// Always zero; the statement covers the student's whole history.
    pub opening_balance: Decimal,
    /// Running balance after the last line.
    pub closing_balance: Decimal,
}

/// A statement together with the student it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLedger {
    /// The student.
    pub student: StudentSummary,
    /// The statement.
    #[serde(flatten)]
    pub statement: LedgerStatement,
}
