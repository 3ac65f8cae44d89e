//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use feeledger_core::reports::{ReportFilter, ReportQuery};
use feeledger_db::ReportRepository;
use feeledger_shared::AppError;

use crate::AppState;
use crate::error::{error_response, query_rejection};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/fees", get(get_fee_report))
}

/// GET /reports/fees?month=&class=&head_id=
async fn get_fee_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(&rejection),
    };
    let filter = match ReportFilter::from_query(query) {
        Ok(filter) => filter,
        Err(e) => return error_response(&AppError::from(e)),
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.fee_report(filter).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
