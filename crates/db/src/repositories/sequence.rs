//! Receipt sequence allocation.
//!
//! One counter row per `YYYY-MM`. The upsert below takes the row lock, so
//! concurrent payments in the same month serialize on it and numbers come out
//! gapless as long as the surrounding transaction commits.

use feeledger_core::billing::BillingPeriod;
use feeledger_core::payment::ReceiptNumber;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, Statement, TransactionTrait,
};

use super::payment::PaymentRecordError;

const NEXT_RECEIPT_SQL: &str = r"
INSERT INTO receipts_sequence (year_month, next_number, updated_at)
VALUES ($1, 2, now())
ON CONFLICT (year_month)
DO UPDATE SET next_number = receipts_sequence.next_number + 1, updated_at = now()
RETURNING next_number
";

#[derive(Debug, FromQueryResult)]
struct CounterRow {
    next_number: i64,
}

/// Allocates the next receipt number for `period` on `conn`.
///
/// Must run inside the transaction that inserts the payment: a rollback
/// returns the number to the pool.
pub(crate) async fn allocate<C: ConnectionTrait>(
    conn: &C,
    period: BillingPeriod,
) -> Result<ReceiptNumber, PaymentRecordError> {
    let row = CounterRow::find_by_statement(Statement::from_sql_and_values(
        conn.get_database_backend(),
        NEXT_RECEIPT_SQL,
        [period.to_string().into()],
    ))
    .one(conn)
    .await?
    .ok_or_else(|| DbErr::RecordNotFound("receipts_sequence upsert returned no row".into()))?;

    Ok(ReceiptNumber::issued_from_counter(period, row.next_number)?)
}

/// Receipt sequence repository.
#[derive(Debug, Clone)]
pub struct ReceiptSequenceRepository {
    db: DatabaseConnection,
}

impl ReceiptSequenceRepository {
    /// Creates a new receipt sequence repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues the next receipt number for `period` in its own transaction.
    ///
    /// Payment recording allocates inside the payment transaction instead;
    /// this is for callers that need a number outside that flow.
    pub async fn next_receipt_number(
        &self,
        period: BillingPeriod,
    ) -> Result<ReceiptNumber, PaymentRecordError> {
        let txn = self.db.begin().await?;
        let receipt = allocate(&txn, period).await?;
        txn.commit().await?;
        Ok(receipt)
    }
}
