//! Generation request validation.

use serde::Deserialize;

use super::error::BillingError;
use super::period::BillingPeriod;
use super::types::{GenerationStrategy, HeadOverride};

/// A generation request as received from a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Class to bill.
    #[serde(alias = "class")]
    pub class_label: String,
    /// `YYYY-MM`.
    #[serde(alias = "month")]
    pub period: String,
    /// Optional head list replacing the active heads.
    #[serde(default, alias = "heads")]
    pub heads_override: Option<Vec<HeadOverride>>,
    /// `DEFAULT_HEADS` or `CUSTOM_PER_CLASS`.
    #[serde(default)]
    pub strategy: Option<String>,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Trimmed class label.
    pub class_label: String,
    /// Period to bill.
    pub period: BillingPeriod,
    /// Chosen strategy.
    pub strategy: GenerationStrategy,
    /// Non-empty override list, if any.
    pub overrides: Option<Vec<HeadOverride>>,
}

impl GenerationPlan {
    /// Validates a request into a plan.
    pub fn from_request(request: GenerationRequest) -> Result<Self, BillingError> {
        let class_label = request.class_label.trim().to_string();
        if class_label.is_empty() {
            return Err(BillingError::MissingClass);
        }

        let period: BillingPeriod = request.period.trim().parse()?;

        let strategy = match request.strategy.as_deref().map(str::trim) {
            None | Some("") => GenerationStrategy::default(),
            Some(raw) => raw.parse()?,
        };

        let overrides = request.heads_override.filter(|heads| !heads.is_empty());
        if strategy == GenerationStrategy::CustomPerClass && overrides.is_none() {
            return Err(BillingError::OverrideRequired);
        }

        Ok(Self {
            class_label,
            period,
            strategy,
            overrides,
        })
    }
}
