//! Schema migrations for the fee ledger.
//!
//! Reads `DATABASE_URL` and accepts the standard sea-orm-migration
//! subcommands (`up`, `down`, `status`, `fresh`, `refresh`, `reset`).

use feeledger_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
