//! Payment repository.
//!
//! Recording a payment is one database transaction:
//! lock invoice, reject duplicates, check state and balance, allocate a
//! receipt number, insert the payment, recompute the invoice, consume the
//! idempotency key, commit. Any failure drops the transaction, which rolls
//! everything back including the receipt counter.

use chrono::{DateTime, Utc};
use feeledger_core::invoice::InvoiceAggregator;
use feeledger_core::payment::{
    PaymentError, PaymentMode, PaymentValidator, ReceiptNumber, ValidatedPayment,
};
use feeledger_shared::AppError;
use feeledger_shared::types::{InvoiceId, PaymentId, round_money};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;

use super::error::{database_error, unique_violation};
use super::invoice::{InvoiceView, totals_of};
use super::sequence;
use crate::entities::{idempotency, invoices, payments};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentRecordError {
    /// Payment rejected by a business rule.
    #[error(transparent)]
    Rejected(#[from] PaymentError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PaymentRecordError> for AppError {
    fn from(err: PaymentRecordError) -> Self {
        match err {
            PaymentRecordError::Rejected(e) => e.into(),
            PaymentRecordError::Database(e) => database_error(&e),
        }
    }
}

/// A stored payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    /// Payment id.
    pub id: PaymentId,
    /// Invoice paid against.
    pub invoice_id: InvoiceId,
    /// Amount received.
    pub amount: Decimal,
    /// Payment mode.
    pub mode: PaymentMode,
    /// External transaction reference.
    pub txn_ref: Option<String>,
    /// When the money was received.
    pub paid_on: DateTime<Utc>,
    /// Issued receipt number.
    pub receipt_number: String,
    /// When the payment was recorded.
    pub created_at: DateTime<Utc>,
}

impl From<payments::Model> for PaymentView {
    fn from(model: payments::Model) -> Self {
        Self {
            id: PaymentId::from_uuid(model.id),
            invoice_id: InvoiceId::from_uuid(model.invoice_id),
            amount: round_money(model.amount),
            mode: model.mode.into(),
            txn_ref: model.txn_ref,
            paid_on: model.paid_on.with_timezone(&Utc),
            receipt_number: model.receipt_number,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Result of a recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedPayment {
    /// New payment id.
    pub payment_id: PaymentId,
    /// Issued receipt number.
    pub receipt_number: String,
    /// Invoice after the payment.
    pub invoice: InvoiceView,
}

/// Maps a unique violation raised while inserting to the duplicate it means.
///
/// A concurrent request on another invoice can slip past the explicit checks
/// and only collide on the constraint.
fn classify_insert_error(err: DbErr, payment: &ValidatedPayment) -> PaymentRecordError {
    let Some(message) = unique_violation(&err) else {
        return err.into();
    };
    if message.contains("idempotency") {
        if let Some(key) = &payment.idempotency_key {
            return PaymentError::DuplicateIdempotencyKey(key.clone()).into();
        }
    }
    if message.contains("txn_ref") {
        if let Some(txn_ref) = &payment.txn_ref {
            return PaymentError::DuplicateTxnRef(txn_ref.clone()).into();
        }
    }
    err.into()
}

/// Payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a validated payment against its invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The invoice does not exist
    /// - The idempotency key or transaction reference was already used
    /// - The invoice is void
    /// - The amount exceeds the invoice balance
    /// - Database operation fails
    pub async fn record_payment(
        &self,
        payment: ValidatedPayment,
    ) -> Result<RecordedPayment, PaymentRecordError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(payment.invoice_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(PaymentError::InvoiceNotFound(payment.invoice_id))?;

        if let Some(key) = &payment.idempotency_key {
            if idempotency::Entity::find_by_id(key.clone())
                .one(&txn)
                .await?
                .is_some()
            {
                return Err(PaymentError::DuplicateIdempotencyKey(key.clone()).into());
            }
        }

        if let Some(txn_ref) = &payment.txn_ref {
            if payments::Entity::find()
                .filter(payments::Column::TxnRef.eq(txn_ref.as_str()))
                .one(&txn)
                .await?
                .is_some()
            {
                return Err(PaymentError::DuplicateTxnRef(txn_ref.clone()).into());
            }
        }

        let current = totals_of(&invoice);
        PaymentValidator::check_against_invoice(
            payment.invoice_id,
            current.status,
            current.balance,
            payment.amount,
        )?;

        let receipt = sequence::allocate(&txn, ReceiptNumber::period_for(payment.paid_on)).await?;
        let receipt_number = receipt.to_string();
        let payment_id = PaymentId::new();
        let now = Utc::now();

        payments::ActiveModel {
            id: Set(payment_id.into_inner()),
            invoice_id: Set(invoice.id),
            amount: Set(payment.amount),
            mode: Set(payment.mode.into()),
            txn_ref: Set(payment.txn_ref.clone()),
            paid_on: Set(payment.paid_on.into()),
            receipt_number: Set(receipt_number.clone()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_insert_error(e, &payment))?;

        let totals = InvoiceAggregator::apply_payment(&current, payment.amount);
        let mut active: invoices::ActiveModel = invoice.into();
        active.paid_total = Set(totals.paid_total);
        active.balance = Set(totals.balance);
        active.status = Set(totals.status.into());
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await?;

        if let Some(key) = &payment.idempotency_key {
            idempotency::ActiveModel {
                key: Set(key.clone()),
                payment_id: Set(payment_id.into_inner()),
                created_at: Set(now.into()),
            }
            .insert(&txn)
            .await
            .map_err(|e| classify_insert_error(e, &payment))?;
        }

        txn.commit().await?;

        info!(
            payment_id = %payment_id,
            invoice_id = %payment.invoice_id,
            amount = %payment.amount,
            mode = %payment.mode,
            receipt_number = %receipt_number,
            status = %totals.status,
            "Payment recorded"
        );

        Ok(RecordedPayment {
            payment_id,
            receipt_number,
            invoice: updated.into(),
        })
    }
}
