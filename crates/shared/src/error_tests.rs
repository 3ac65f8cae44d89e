use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::InvalidArgument(String::new()), 400, "INVALID_ARGUMENT")]
#[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
#[case(AppError::AlreadyExists(String::new()), 409, "ALREADY_EXISTS")]
#[case(AppError::FailedPrecondition(String::new()), 412, "FAILED_PRECONDITION")]
#[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
#[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::InvalidArgument("msg".into()).to_string(),
        "Invalid argument: msg"
    );
    assert_eq!(AppError::NotFound("msg".into()).to_string(), "Not found: msg");
    assert_eq!(
        AppError::AlreadyExists("msg".into()).to_string(),
        "Already exists: msg"
    );
    assert_eq!(
        AppError::FailedPrecondition("msg".into()).to_string(),
        "Failed precondition: msg"
    );
    assert_eq!(
        AppError::Database("msg".into()).to_string(),
        "Database error: msg"
    );
}

#[test]
fn test_internal_errors_are_flagged() {
    assert!(AppError::Database("x".into()).is_internal());
    assert!(AppError::Internal("x".into()).is_internal());
    assert!(!AppError::NotFound("x".into()).is_internal());
    assert!(!AppError::AlreadyExists("x".into()).is_internal());
}

#[test]
fn test_message_strips_prefix() {
    let err = AppError::FailedPrecondition("Cannot pay a void invoice".into());
    assert_eq!(err.message(), "Cannot pay a void invoice");
}
