//! Report repository for fee collection reports.

use feeledger_core::reports::{
    FeeReport, InvoiceFigures, ItemFigures, ReportFilter, ReportService,
};
use feeledger_shared::AppError;
use feeledger_shared::types::{FeeHeadId, InvoiceId, StudentId};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait, Select,
};

use super::error::database_error;
use super::snapshot::begin_snapshot;
use crate::entities::{invoice_items, invoices, sea_orm_active_enums::InvoiceStatus};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportQueryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportQueryError> for AppError {
    fn from(err: ReportQueryError) -> Self {
        match err {
            ReportQueryError::Database(e) => database_error(&e),
        }
    }
}

/// Applies the period/class filters and drops void invoices.
fn scoped<E: EntityTrait>(mut query: Select<E>, filter: &ReportFilter) -> Select<E> {
    query = query.filter(invoices::Column::Status.ne(InvoiceStatus::Void));
    if let Some(period) = &filter.period {
        query = query.filter(invoices::Column::Period.eq(period.to_string()));
    }
    if let Some(class_label) = &filter.class_label {
        query = query.filter(invoices::Column::ClassLabel.eq(class_label.as_str()));
    }
    query
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the fee collection report for `filter` from a single snapshot.
    pub async fn fee_report(&self, filter: ReportFilter) -> Result<FeeReport, ReportQueryError> {
        let txn = begin_snapshot(&self.db).await?;

        let invoices: Vec<InvoiceFigures> = scoped(invoices::Entity::find(), &filter)
            .all(&txn)
            .await?
            .into_iter()
            .map(|invoice| InvoiceFigures {
                invoice_id: InvoiceId::from_uuid(invoice.id),
                student_id: StudentId::from_uuid(invoice.student_id),
                class_label: invoice.class_label,
                billed_total: invoice.billed_total,
                paid_total: invoice.paid_total,
                balance: invoice.balance,
                status: invoice.status.into(),
            })
            .collect();

        let mut items_query = scoped(
            invoice_items::Entity::find()
                .join(JoinType::InnerJoin, invoice_items::Relation::Invoices.def()),
            &filter,
        );
        if let Some(head_id) = filter.head_id {
            items_query = items_query.filter(invoice_items::Column::HeadId.eq(head_id.into_inner()));
        }
        let items: Vec<ItemFigures> = items_query
            .all(&txn)
            .await?
            .into_iter()
            .map(|item| ItemFigures {
                invoice_id: InvoiceId::from_uuid(item.invoice_id),
                head_id: FeeHeadId::from_uuid(item.head_id),
                head_name: item.head_name,
                amount: item.amount,
            })
            .collect();

        txn.commit().await?;

        Ok(ReportService::generate_fee_report(filter, &invoices, &items))
    }
}
