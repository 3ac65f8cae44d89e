//! Invoice status values.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Nothing has been paid.
    Unpaid,
    /// Something has been paid, less than the billed total.
    Partial,
    /// Paid in full (or more).
    Paid,
    /// Administratively cancelled; accepts no payments.
    Void,
}

/// Returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown invoice status: {0}")]
pub struct UnknownStatus(pub String);

impl InvoiceStatus {
    /// Returns the wire/database representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Partial => "PARTIAL",
            Self::Paid => "PAID",
            Self::Void => "VOID",
        }
    }

    /// Returns true if payments may be recorded against the invoice.
    #[must_use]
    pub const fn accepts_payments(&self) -> bool {
        !matches!(self, Self::Void)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNPAID" => Ok(Self::Unpaid),
            "PARTIAL" => Ok(Self::Partial),
            "PAID" => Ok(Self::Paid),
            "VOID" => Ok(Self::Void),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}
