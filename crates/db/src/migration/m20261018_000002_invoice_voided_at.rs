//! Records when an invoice was voided.
//!
//! Existing void invoices take their last update as the void time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(ADD_VOIDED_AT_SQL)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DROP_VOIDED_AT_SQL)
            .await?;
        Ok(())
    }
}

const ADD_VOIDED_AT_SQL: &str = r"
ALTER TABLE invoices ADD COLUMN voided_at TIMESTAMPTZ;

UPDATE invoices SET voided_at = updated_at WHERE status = 'VOID';

ALTER TABLE invoices ADD CONSTRAINT chk_invoices_voided_at
    CHECK ((status = 'VOID') = (voided_at IS NOT NULL));
";

const DROP_VOIDED_AT_SQL: &str = r"
ALTER TABLE invoices DROP CONSTRAINT IF EXISTS chk_invoices_voided_at;
ALTER TABLE invoices DROP COLUMN IF EXISTS voided_at;
";
