//! Receipt repository: everything printed on a payment receipt.

use feeledger_core::student::StudentSummary;
use feeledger_shared::AppError;
use feeledger_shared::types::PaymentId;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use super::error::database_error;
use super::snapshot::begin_snapshot;
use super::invoice::{InvoiceItemView, InvoiceView};
use super::payment::PaymentView;
use crate::entities::{invoice_items, invoices, payments, students};

/// Error types for receipt lookups.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(PaymentId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReceiptError> for AppError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::NotFound(_) => Self::NotFound(err.to_string()),
            ReceiptError::Database(e) => database_error(&e),
        }
    }
}

/// A payment receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptView {
    /// The payment.
    pub payment: PaymentView,
    /// The invoice it was paid against, as it is now.
    pub invoice: InvoiceView,
    /// The billed student.
    pub student: StudentSummary,
    /// Invoice lines, by head name.
    pub items: Vec<InvoiceItemView>,
}

/// Receipt repository.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the receipt of a payment from a single snapshot.
    pub async fn get_receipt(&self, payment_id: PaymentId) -> Result<ReceiptView, ReceiptError> {
        let txn = begin_snapshot(&self.db).await?;

        let (payment, invoice) = payments::Entity::find_by_id(payment_id.into_inner())
            .find_also_related(invoices::Entity)
            .one(&txn)
            .await?
            .ok_or(ReceiptError::NotFound(payment_id))?;
        let invoice = invoice.ok_or_else(|| {
            DbErr::RecordNotFound(format!("invoice of payment {payment_id}"))
        })?;

        let student = students::Entity::find_by_id(invoice.student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("student of invoice {}", invoice.id)))?;

        let items = invoice_items::Entity::find()
            .filter(invoice_items::Column::InvoiceId.eq(invoice.id))
            .order_by_asc(invoice_items::Column::HeadName)
            .all(&txn)
            .await?
            .into_iter()
            .map(InvoiceItemView::from)
            .collect();

        txn.commit().await?;

        Ok(ReceiptView {
            payment: payment.into(),
            invoice: invoice.into(),
            student: student.into(),
            items,
        })
    }
}
