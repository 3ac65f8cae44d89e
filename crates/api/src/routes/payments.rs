//! Payment routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use feeledger_core::payment::{PaymentRequest, PaymentValidator};
use feeledger_db::PaymentRepository;
use feeledger_shared::AppError;

use crate::AppState;
use crate::error::{error_response, json_rejection};

/// Header carrying the idempotency key when the body has none.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/payments", post(create_payment))
}

/// POST /payments
///
/// Records a payment and returns the receipt number with the updated invoice.
async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response {
    let mut request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&rejection),
    };

    if request.idempotency_key.is_none() {
        request.idempotency_key = headers
            .get(IDEMPOTENCY_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
    }

    let payment = match PaymentValidator::validate(request, Utc::now()) {
        Ok(payment) => payment,
        Err(e) => return error_response(&AppError::from(e)),
    };

    let repo = PaymentRepository::new((*state.db).clone());
    match repo.record_payment(payment).await {
        Ok(recorded) => (StatusCode::CREATED, Json(recorded)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
