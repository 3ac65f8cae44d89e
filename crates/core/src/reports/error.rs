//! Report error types.

use feeledger_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Month filter is not `YYYY-MM`.
    #[error("Invalid month, expected YYYY-MM: {0}")]
    InvalidPeriod(String),

    /// Head filter is not a valid id.
    #[error("Invalid head_id: {0}")]
    InvalidHeadId(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
