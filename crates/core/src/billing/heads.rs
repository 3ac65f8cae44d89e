//! Fee-head resolution.

use std::collections::{HashMap, HashSet};

use feeledger_shared::types::{FeeHeadId, round_money};
use rust_decimal::Decimal;

use super::error::BillingError;
use super::types::{FeeHeadInfo, HeadOverride, ResolvedHead};

/// Decides which heads, at which amounts, go on each invoice.
pub struct HeadResolver;

impl HeadResolver {
    /// Resolves the head list for a generation run.
    ///
    /// Without overrides every active head is billed at its default amount.
    /// With overrides each listed head must exist, be active, appear once and
    /// carry a non-negative amount. The result is ordered by head name.
    pub fn resolve(
        available: &[FeeHeadInfo],
        overrides: Option<&[HeadOverride]>,
    ) -> Result<Vec<ResolvedHead>, BillingError> {
        let mut resolved = match overrides {
            None | Some([]) => available
                .iter()
                .filter(|head| head.active)
                .map(|head| ResolvedHead {
                    head_id: head.id,
                    name: head.name.clone(),
                    amount: round_money(head.default_amount),
                })
                .collect::<Vec<_>>(),
            Some(list) => Self::resolve_overrides(available, list)?,
        };

        if resolved.is_empty() {
            return Err(BillingError::NoActiveHeads);
        }

        resolved.sort_by(|a, b| a.name.cmp(&b.name).then(a.head_id.cmp(&b.head_id)));
        Ok(resolved)
    }

    fn resolve_overrides(
        available: &[FeeHeadInfo],
        list: &[HeadOverride],
    ) -> Result<Vec<ResolvedHead>, BillingError> {
        let by_id: HashMap<FeeHeadId, &FeeHeadInfo> =
            available.iter().map(|head| (head.id, head)).collect();
        let mut seen = HashSet::with_capacity(list.len());

        list.iter()
            .map(|entry| {
                if !seen.insert(entry.head_id) {
                    return Err(BillingError::DuplicateHead(entry.head_id));
                }
                let head = by_id
                    .get(&entry.head_id)
                    .ok_or(BillingError::UnknownHead(entry.head_id))?;
                if !head.active {
                    return Err(BillingError::InactiveHead(entry.head_id));
                }
                let amount = entry.amount.unwrap_or(head.default_amount);
                if amount < Decimal::ZERO {
                    return Err(BillingError::NegativeAmount {
                        head_id: entry.head_id,
                        amount,
                    });
                }
                Ok(ResolvedHead {
                    head_id: head.id,
                    name: head.name.clone(),
                    amount: round_money(amount),
                })
            })
            .collect()
    }

    /// Sum of resolved amounts.
    #[must_use]
    pub fn billed_total(heads: &[ResolvedHead]) -> Decimal {
        round_money(heads.iter().map(|head| head.amount).sum())
    }
}
