//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_fee_ledger;
mod m20261018_000002_invoice_voided_at;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_fee_ledger::Migration),
            Box::new(m20261018_000002_invoice_voided_at::Migration),
        ]
    }
}
