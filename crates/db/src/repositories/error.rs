//! Database error helpers shared by the repositories.

use feeledger_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Returns the driver message if `err` is a unique-constraint violation.
pub(crate) fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => None,
    }
}

/// Converts an unexpected database error into [`AppError::Database`].
///
/// The driver message is logged, not returned.
pub fn database_error(err: &DbErr) -> AppError {
    tracing::error!(error = %err, "Database operation failed");
    AppError::Database(err.to_string())
}
