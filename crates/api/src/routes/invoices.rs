//! Invoice routes: generation, listing and voiding.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use feeledger_core::billing::{BillingPeriod, GenerationPlan, GenerationRequest};
use feeledger_core::invoice::{InvoiceError, InvoiceStatus};
use feeledger_db::InvoiceRepository;
use feeledger_db::repositories::InvoiceListFilter;
use feeledger_shared::AppError;
use feeledger_shared::types::{InvoiceId, OffsetPage};
use serde::Deserialize;

use crate::AppState;
use crate::error::{error_response, json_rejection, parse_id, query_rejection};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices))
        .route("/invoices/generate", post(generate_invoices))
        .route("/invoices/{invoice_id}/void", post(void_invoice))
}

/// Query parameters for listing invoices.
#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesQuery {
    /// Class label.
    pub class: Option<String>,
    /// `YYYY-MM`.
    pub month: Option<String>,
    /// Invoice status.
    pub status: Option<String>,
    /// Student name or roll number fragment.
    pub q: Option<String>,
    /// Page size.
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses listing query parameters into a filter and a page.
fn list_params(
    query: ListInvoicesQuery,
    state: &AppState,
) -> Result<(InvoiceListFilter, OffsetPage), AppError> {
    let period = non_blank(query.month)
        .map(|m| m.parse::<BillingPeriod>())
        .transpose()?;
    let status = non_blank(query.status)
        .map(|s| s.parse::<InvoiceStatus>().map_err(InvoiceError::from))
        .transpose()?;
    let page = OffsetPage::resolve(
        query.limit,
        query.offset,
        state.fees.default_page_size,
        state.fees.max_page_size,
    )
    .map_err(|e| AppError::InvalidArgument(e.to_string()))?;

    Ok((
        InvoiceListFilter {
            class_label: non_blank(query.class),
            period,
            status,
            search: non_blank(query.q),
        },
        page,
    ))
}

/// GET /invoices
async fn list_invoices(
    State(state): State<AppState>,
    query: Result<Query<ListInvoicesQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(&rejection),
    };
    let (filter, page) = match list_params(query, &state) {
        Ok(params) => params,
        Err(e) => return error_response(&e),
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.list_invoices(&filter, page).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST /invoices/generate
async fn generate_invoices(
    State(state): State<AppState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(&rejection),
    };
    let plan = match GenerationPlan::from_request(request) {
        Ok(plan) => plan,
        Err(e) => return error_response(&AppError::from(e)),
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.generate_invoices(plan).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

/// POST /invoices/{invoice_id}/void
async fn void_invoice(State(state): State<AppState>, Path(invoice_id): Path<String>) -> Response {
    let invoice_id: InvoiceId = match parse_id(&invoice_id, "invoice id") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let repo = InvoiceRepository::new((*state.db).clone());
    match repo.void_invoice(invoice_id).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeledger_shared::config::FeesConfig;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            fees: FeesConfig {
                default_page_size: 50,
                max_page_size: 200,
            },
        }
    }

    #[test]
    fn test_list_params_defaults() {
        let (filter, page) = list_params(ListInvoicesQuery::default(), &state()).unwrap();
        assert!(filter.class_label.is_none());
        assert!(filter.status.is_none());
        assert_eq!(page.limit, 50);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_list_params_parses_and_clamps() {
        let query = ListInvoicesQuery {
            class: Some("5A".into()),
            month: Some("2024-01".into()),
            status: Some("partial".into()),
            q: Some("  ".into()),
            limit: Some(1000),
            offset: Some(20),
        };
        let (filter, page) = list_params(query, &state()).unwrap();
        assert_eq!(filter.class_label.as_deref(), Some("5A"));
        assert_eq!(filter.status, Some(InvoiceStatus::Partial));
        assert!(filter.search.is_none());
        assert_eq!(page.limit, 200);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn test_list_params_rejects_bad_values() {
        let bad_status = ListInvoicesQuery {
            status: Some("OVERDUE".into()),
            ..ListInvoicesQuery::default()
        };
        assert!(matches!(
            list_params(bad_status, &state()),
            Err(AppError::InvalidArgument(_))
        ));

        let bad_offset = ListInvoicesQuery {
            offset: Some(-1),
            ..ListInvoicesQuery::default()
        };
        assert!(matches!(
            list_params(bad_offset, &state()),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
