//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod invoices;
pub mod ledger;
pub mod payments;
pub mod receipts;
pub mod reference;
pub mod reports;


/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(payments::routes())
        .merge(invoices::routes())
        .merge(ledger::routes())
        .merge(receipts::routes())
        .merge(reports::routes())
        .merge(reference::routes())
}
