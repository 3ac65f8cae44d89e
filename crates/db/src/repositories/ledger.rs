//! Ledger repository: per-student statements.

use chrono::Utc;
use feeledger_core::ledger::{InvoiceCharge, LedgerBuilder, PaymentCredit, StudentLedger};
use feeledger_core::student::StudentSummary;
use feeledger_shared::AppError;
use feeledger_shared::types::{InvoiceId, PaymentId, StudentId};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};

use super::error::database_error;
use super::snapshot::begin_snapshot;
use crate::entities::{invoices, payments, students};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Student not found.
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::StudentNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::Database(e) => database_error(&e),
        }
    }
}

/// Ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the statement of one student from a single snapshot.
    ///
    /// Void invoices keep their charge and gain an offsetting void line.
    pub async fn get_ledger(&self, student_id: StudentId) -> Result<StudentLedger, LedgerError> {
        let txn = begin_snapshot(&self.db).await?;

        let student = students::Entity::find_by_id(student_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(LedgerError::StudentNotFound(student_id))?;

        let charges: Vec<InvoiceCharge> = invoices::Entity::find()
            .filter(invoices::Column::StudentId.eq(student.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|invoice| InvoiceCharge {
                invoice_id: InvoiceId::from_uuid(invoice.id),
                period: invoice.period,
                billed_total: invoice.billed_total,
                created_at: invoice.created_at.with_timezone(&Utc),
                voided_at: invoice.voided_at.map(|at| at.with_timezone(&Utc)),
            })
            .collect();

        let credits: Vec<PaymentCredit> = payments::Entity::find()
            .join(JoinType::InnerJoin, payments::Relation::Invoices.def())
            .filter(invoices::Column::StudentId.eq(student.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|payment| PaymentCredit {
                payment_id: PaymentId::from_uuid(payment.id),
                amount: payment.amount,
                mode: payment.mode.into(),
                txn_ref: payment.txn_ref,
                paid_on: payment.paid_on.with_timezone(&Utc),
                receipt_number: payment.receipt_number,
            })
            .collect();

        txn.commit().await?;

        Ok(StudentLedger {
            student: StudentSummary::from(student),
            statement: LedgerBuilder::build(charges, credits),
        })
    }
}
