//! Receipt routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use feeledger_db::ReceiptRepository;
use feeledger_shared::AppError;
use feeledger_shared::types::PaymentId;

use crate::AppState;
use crate::error::{error_response, parse_id};

/// Creates the receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/receipt/{payment_id}", get(get_receipt))
}

/// GET /receipt/{payment_id}
async fn get_receipt(State(state): State<AppState>, Path(payment_id): Path<String>) -> Response {
    let payment_id: PaymentId = match parse_id(&payment_id, "payment id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let repo = ReceiptRepository::new((*state.db).clone());
    match repo.get_receipt(payment_id).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
