//! Fee head repository.

use feeledger_core::billing::FeeHeadInfo;
use feeledger_shared::types::{FeeHeadId, round_money};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::fee_heads;

pub(crate) fn head_info(model: fee_heads::Model) -> FeeHeadInfo {
    FeeHeadInfo {
        id: FeeHeadId::from_uuid(model.id),
        name: model.name,
        default_amount: round_money(model.default_amount),
        active: model.active,
    }
}

/// Fee head repository.
#[derive(Debug, Clone)]
pub struct FeeHeadRepository {
    db: DatabaseConnection,
}

impl FeeHeadRepository {
    /// Creates a new fee head repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists fee heads by name.
    pub async fn list_fee_heads(&self, active_only: bool) -> Result<Vec<FeeHeadInfo>, DbErr> {
        let mut query = fee_heads::Entity::find();
        if active_only {
            query = query.filter(fee_heads::Column::Active.eq(true));
        }
        Ok(query
            .order_by_asc(fee_heads::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(head_info)
            .collect())
    }
}
