//! JSON error responses.
//!
//! Every failure is answered as `{"error": <CODE>, "message": <text>}` with the
//! status code of its [`AppError`] kind. Internal errors are logged and
//! answered with a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use feeledger_shared::AppError;
use serde_json::json;
use tracing::error;

/// Builds the error response for `err`.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if err.is_internal() {
        error!(error = %err, "Request failed");
        "An internal error occurred".to_string()
    } else {
        err.message().to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message,
        })),
    )
        .into_response()
}

/// Maps a malformed JSON body to `INVALID_ARGUMENT`.
pub fn json_rejection(rejection: &JsonRejection) -> Response {
    error_response(&AppError::InvalidArgument(rejection.body_text()))
}

/// Maps a malformed query string to `INVALID_ARGUMENT`.
pub fn query_rejection(rejection: &QueryRejection) -> Response {
    error_response(&AppError::InvalidArgument(rejection.body_text()))
}

/// Parses a path id, answering `INVALID_ARGUMENT` when it is not a UUID.
pub fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, Response> {
    raw.parse()
        .map_err(|_| error_response(&AppError::InvalidArgument(format!("Invalid {what}: {raw}"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = error_response(&AppError::AlreadyExists("Idempotency key already used: k1".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ALREADY_EXISTS");
        assert_eq!(body["message"], "Idempotency key already used: k1");
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let response = error_response(&AppError::Database("connection reset".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_parse_id() {
        let id: Result<uuid::Uuid, _> = parse_id("0190f3b4-6c9e-7d4a-9a51-3f2b8c1d2e3f", "invoice id");
        assert!(id.is_ok());
        let bad: Result<uuid::Uuid, _> = parse_id("42", "invoice id");
        assert_eq!(bad.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }
}
