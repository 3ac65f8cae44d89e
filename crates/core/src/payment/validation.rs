//! Payment validation.

use chrono::{DateTime, NaiveDate, Utc};
use feeledger_shared::types::{InvoiceId, round_money};
use rust_decimal::Decimal;

use super::error::PaymentError;
use super::types::{PaymentMode, PaymentRequest, ValidatedPayment};
use crate::invoice::InvoiceStatus;

/// Validates payment requests.
pub struct PaymentValidator;

impl PaymentValidator {
    /// Validates a request before any database work.
    ///
    /// `now` is used when the request carries no `paid_on`.
    pub fn validate(
        request: PaymentRequest,
        now: DateTime<Utc>,
    ) -> Result<ValidatedPayment, PaymentError> {
        if request.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        let amount = round_money(request.amount);
        if amount.is_zero() {
            return Err(PaymentError::AmountRoundsToZero(request.amount));
        }

        let mode: PaymentMode = request.mode.parse()?;
        let txn_ref = non_blank(request.txn_ref);
        if mode.requires_txn_ref() && txn_ref.is_none() {
            return Err(PaymentError::MissingTxnRef(mode.to_string()));
        }

        let paid_on = match non_blank(request.paid_on) {
            Some(raw) => Self::parse_paid_on(&raw)?,
            None => now,
        };

        Ok(ValidatedPayment {
            invoice_id: request.invoice_id,
            amount,
            mode,
            txn_ref,
            paid_on,
            idempotency_key: non_blank(request.idempotency_key),
        })
    }

    /// Parses an RFC 3339 timestamp, or a plain date taken as midnight UTC.
    pub fn parse_paid_on(raw: &str) -> Result<DateTime<Utc>, PaymentError> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| PaymentError::InvalidPaidOn(raw.to_string()))
    }

    /// Checks a validated amount against the locked invoice.
    pub fn check_against_invoice(
        invoice_id: InvoiceId,
        status: InvoiceStatus,
        balance: Decimal,
        amount: Decimal,
    ) -> Result<(), PaymentError> {
        if !status.accepts_payments() {
            return Err(PaymentError::InvoiceVoid(invoice_id));
        }
        if amount > balance {
            return Err(PaymentError::ExceedsBalance { amount, balance });
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    fn request(amount: Decimal, mode: &str) -> PaymentRequest {
        PaymentRequest {
            invoice_id: InvoiceId::new(),
            amount,
            mode: mode.to_string(),
            txn_ref: None,
            paid_on: None,
            idempotency_key: None,
        }
    }

    #[test]
    fn test_cash_payment_defaults_paid_on_to_now() {
        let validated = PaymentValidator::validate(request(dec!(2000), "CASH"), now()).unwrap();
        assert_eq!(validated.amount, dec!(2000.00));
        assert_eq!(validated.mode, PaymentMode::Cash);
        assert_eq!(validated.paid_on, now());
        assert!(validated.txn_ref.is_none());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-10))]
    fn test_non_positive_amount_rejected(#[case] amount: Decimal) {
        let err = PaymentValidator::validate(request(amount, "CASH"), now()).unwrap_err();
        assert_eq!(err, PaymentError::NonPositiveAmount);
    }

    #[test]
    fn test_amount_rounding_to_zero_rejected() {
        let err = PaymentValidator::validate(request(dec!(0.004), "CASH"), now()).unwrap_err();
        assert!(matches!(err, PaymentError::AmountRoundsToZero(_)));
    }

    #[test]
    fn test_amount_rounded_half_up() {
        let validated = PaymentValidator::validate(request(dec!(10.005), "CASH"), now()).unwrap();
        assert_eq!(validated.amount, dec!(10.01));
    }

    #[rstest]
    #[case("CARD")]
    #[case("UPI")]
    #[case("BANK")]
    #[case("OTHER")]
    fn test_non_cash_requires_txn_ref(#[case] mode: &str) {
        let mut req = request(dec!(100), mode);
        req.txn_ref = Some("   ".to_string());
        let err = PaymentValidator::validate(req, now()).unwrap_err();
        assert!(matches!(err, PaymentError::MissingTxnRef(_)));
    }

    #[test]
    fn test_blank_optional_strings_are_absent() {
        let mut req = request(dec!(100), "cash");
        req.txn_ref = Some(String::new());
        req.idempotency_key = Some("  ".to_string());
        let validated = PaymentValidator::validate(req, now()).unwrap();
        assert!(validated.txn_ref.is_none());
        assert!(validated.idempotency_key.is_none());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = PaymentValidator::validate(request(dec!(100), "CHEQUE"), now()).unwrap_err();
        assert_eq!(err, PaymentError::UnknownMode("CHEQUE".to_string()));
    }

    #[rstest]
    #[case("2024-01-15", Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())]
    #[case("2024-01-15T10:00:00Z", Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())]
    #[case("2024-01-15T10:00:00+05:30", Utc.with_ymd_and_hms(2024, 1, 15, 4, 30, 0).unwrap())]
    fn test_parse_paid_on(#[case] raw: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(PaymentValidator::parse_paid_on(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("15/01/2024")]
    #[case("2024-13-01")]
    #[case("yesterday")]
    fn test_parse_paid_on_rejects_garbage(#[case] raw: &str) {
        assert!(matches!(
            PaymentValidator::parse_paid_on(raw),
            Err(PaymentError::InvalidPaidOn(_))
        ));
    }

    #[test]
    fn test_check_against_invoice() {
        let id = InvoiceId::new();
        assert!(
            PaymentValidator::check_against_invoice(id, InvoiceStatus::Partial, dec!(3000), dec!(3000))
                .is_ok()
        );
        assert_eq!(
            PaymentValidator::check_against_invoice(id, InvoiceStatus::Paid, dec!(0), dec!(1)),
            Err(PaymentError::ExceedsBalance {
                amount: dec!(1),
                balance: dec!(0)
            })
        );
        assert_eq!(
            PaymentValidator::check_against_invoice(id, InvoiceStatus::Void, dec!(500), dec!(1)),
            Err(PaymentError::InvoiceVoid(id))
        );
    }

    #[test]
    fn test_error_maps_to_app_error() {
        use feeledger_shared::AppError;
        assert!(matches!(
            AppError::from(PaymentError::NonPositiveAmount),
            AppError::InvalidArgument(_)
        ));
        assert!(matches!(
            AppError::from(PaymentError::DuplicateTxnRef("T1".into())),
            AppError::AlreadyExists(_)
        ));
        assert!(matches!(
            AppError::from(PaymentError::InvoiceVoid(InvoiceId::new())),
            AppError::FailedPrecondition(_)
        ));
        assert!(matches!(
            AppError::from(PaymentError::InvoiceNotFound(InvoiceId::new())),
            AppError::NotFound(_)
        ));
    }
}
