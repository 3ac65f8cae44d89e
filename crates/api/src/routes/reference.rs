//! Student and fee-head listings.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use feeledger_db::repositories::database_error;
use feeledger_db::{FeeHeadRepository, StudentRepository};
use serde::Deserialize;

use crate::AppState;
use crate::error::{error_response, query_rejection};

/// Creates the reference data routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/fee-heads", get(list_fee_heads))
}

/// Query parameters for listing students.
#[derive(Debug, Deserialize)]
pub struct StudentsQuery {
    /// Class label.
    pub class: Option<String>,
}

/// Query parameters for listing fee heads.
#[derive(Debug, Deserialize)]
pub struct FeeHeadsQuery {
    /// Only active heads (default true).
    pub active_only: Option<bool>,
}

/// GET /students
async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<StudentsQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(&rejection),
    };
    let class_label = query.class.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let repo = StudentRepository::new((*state.db).clone());
    match repo.list_students(class_label).await {
        Ok(students) => Json(students).into_response(),
        Err(e) => error_response(&database_error(&e)),
    }
}

/// GET /fee-heads
async fn list_fee_heads(
    State(state): State<AppState>,
    query: Result<Query<FeeHeadsQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(&rejection),
    };

    let repo = FeeHeadRepository::new((*state.db).clone());
    match repo.list_fee_heads(query.active_only.unwrap_or(true)).await {
        Ok(heads) => Json(heads).into_response(),
        Err(e) => error_response(&database_error(&e)),
    }
}
