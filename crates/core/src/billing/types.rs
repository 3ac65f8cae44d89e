//! Billing types.

use feeledger_shared::types::FeeHeadId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// A fee head as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeHeadInfo {
    /// Head id.
    pub id: FeeHeadId,
    /// Display name, e.g. `"Tuition"`.
    pub name: String,
    /// Amount billed when no override is given.
    pub default_amount: Decimal,
    /// Inactive heads are never billed.
    pub active: bool,
}

/// One entry of a caller-supplied head list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadOverride {
    /// Head to bill.
    pub head_id: FeeHeadId,
    /// Amount to bill; the head's default when absent.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// A head with the amount that will be billed on each invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHead {
    /// Head id.
    pub head_id: FeeHeadId,
    /// Name snapshot written to the invoice item.
    pub name: String,
    /// Rounded amount.
    pub amount: Decimal,
}

/// How the head list for a generation run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStrategy {
    /// All active heads at their default amounts, unless overridden.
    #[default]
    DefaultHeads,
    /// Class-specific head list; an override is mandatory.
    CustomPerClass,
}

impl GenerationStrategy {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultHeads => "DEFAULT_HEADS",
            Self::CustomPerClass => "CUSTOM_PER_CLASS",
        }
    }
}

impl std::str::FromStr for GenerationStrategy {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEFAULT_HEADS" => Ok(Self::DefaultHeads),
            "CUSTOM_PER_CLASS" => Ok(Self::CustomPerClass),
            _ => Err(BillingError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Invoices inserted.
    pub created: u64,
    /// Existing invoices whose items were replaced.
    pub updated: u64,
}
