//! Payment types.

use chrono::{DateTime, Utc};
use feeledger_shared::types::InvoiceId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Cash at the counter.
    Cash,
    /// Card terminal.
    Card,
    /// UPI transfer.
    Upi,
    /// Bank transfer.
    Bank,
    /// Anything else.
    Other,
}

impl PaymentMode {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Card => "CARD",
            Self::Upi => "UPI",
            Self::Bank => "BANK",
            Self::Other => "OTHER",
        }
    }

    /// Returns true if a transaction reference must accompany the payment.
    #[must_use]
    pub const fn requires_txn_ref(&self) -> bool {
        !matches!(self, Self::Cash)
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMode {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(Self::Cash),
            "CARD" => Ok(Self::Card),
            "UPI" => Ok(Self::Upi),
            "BANK" => Ok(Self::Bank),
            "OTHER" => Ok(Self::Other),
            _ => Err(PaymentError::UnknownMode(s.to_string())),
        }
    }
}

/// A payment request as received from a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    /// Invoice to pay against.
    pub invoice_id: InvoiceId,
    /// Amount, before rounding.
    pub amount: Decimal,
    /// Payment mode string (`CASH`, `CARD`, `UPI`, `BANK`, `OTHER`).
    pub mode: String,
    /// External transaction reference.
    #[serde(default)]
    pub txn_ref: Option<String>,
    /// When the money was received; RFC 3339 or `YYYY-MM-DD`.
    #[serde(default)]
    pub paid_on: Option<String>,
    /// Caller-supplied retry token.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// A payment request that passed every check not needing the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    /// Invoice to pay against.
    pub invoice_id: InvoiceId,
    /// Amount rounded to 2 decimal places, strictly positive.
    pub amount: Decimal,
    /// Parsed mode.
    pub mode: PaymentMode,
    /// Trimmed, non-blank transaction reference.
    pub txn_ref: Option<String>,
    /// Payment instant.
    pub paid_on: DateTime<Utc>,
    /// Trimmed, non-blank idempotency key.
    pub idempotency_key: Option<String>,
}
