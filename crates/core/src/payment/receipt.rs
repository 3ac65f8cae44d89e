//! Receipt numbers.
//!
//! Format: `REC-YYYY-MM-NNNNNN`. The period is the UTC month of the
//! payment's `paid_on`; the sequence restarts at 1 every month and is
//! zero-padded to six digits (wider once it passes 999999).

use chrono::{DateTime, Utc};

use super::error::PaymentError;
use crate::billing::BillingPeriod;

/// Prefix of every receipt number.
pub const RECEIPT_PREFIX: &str = "REC";

/// A receipt number issued from a period's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReceiptNumber {
    /// Counter period.
    pub period: BillingPeriod,
    /// 1-based position within the period.
    pub sequence: u64,
}

impl ReceiptNumber {
    /// Builds a receipt number.
    #[must_use]
    pub const fn new(period: BillingPeriod, sequence: u64) -> Self {
        Self { period, sequence }
    }

    /// Counter period a payment made at `paid_on` draws from.
    #[must_use]
    pub fn period_for(paid_on: DateTime<Utc>) -> BillingPeriod {
        BillingPeriod::from_datetime(paid_on)
    }

    /// Converts the counter's post-increment value into the issued number.
    ///
    /// The counter row stores the *next* number to hand out, so the value
    /// returned by the upsert is one past the issued sequence.
    pub fn issued_from_counter(
        period: BillingPeriod,
        next_number: i64,
    ) -> Result<Self, PaymentError> {
        let issued = next_number
            .checked_sub(1)
            .filter(|n| *n >= 1)
            .ok_or(PaymentError::InvalidCounter(next_number))?;
        Ok(Self::new(period, issued.unsigned_abs()))
    }
}

impl std::fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{RECEIPT_PREFIX}-{}-{:06}", self.period, self.sequence)
    }
}

/// Returned when a string is not a receipt number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed receipt number: {0}")]
pub struct MalformedReceipt(pub String);

impl std::str::FromStr for ReceiptNumber {
    type Err = MalformedReceipt;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MalformedReceipt(s.to_string());
        let rest = s
            .strip_prefix(RECEIPT_PREFIX)
            .and_then(|r| r.strip_prefix('-'))
            .ok_or_else(malformed)?;
        // YYYY-MM is 7 bytes, followed by '-'.
        let (period, seq) = rest.split_at_checked(7).ok_or_else(malformed)?;
        let seq = seq.strip_prefix('-').ok_or_else(malformed)?;
        if seq.len() < 6 || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let period: BillingPeriod = period.parse().map_err(|_| malformed())?;
        let sequence: u64 = seq.parse().map_err(|_| malformed())?;
        if sequence == 0 {
            return Err(malformed());
        }
        Ok(Self::new(period, sequence))
    }
}
