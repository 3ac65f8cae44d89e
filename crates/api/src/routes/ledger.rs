//! Student ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use feeledger_db::LedgerRepository;
use feeledger_shared::AppError;
use feeledger_shared::types::StudentId;

use crate::AppState;
use crate::error::{error_response, parse_id};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ledger/{student_id}", get(get_ledger))
}

/// GET /ledger/{student_id}
async fn get_ledger(State(state): State<AppState>, Path(student_id): Path<String>) -> Response {
    let student_id: StudentId = match parse_id(&student_id, "student id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let repo = LedgerRepository::new((*state.db).clone());
    match repo.get_ledger(student_id).await {
        Ok(ledger) => Json(ledger).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
