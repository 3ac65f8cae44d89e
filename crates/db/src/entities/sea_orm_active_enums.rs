//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use feeledger_core::invoice::InvoiceStatus as DomainInvoiceStatus;
use feeledger_core::payment::PaymentMode as DomainPaymentMode;

/// `invoice_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Nothing paid.
    #[sea_orm(string_value = "UNPAID")]
    Unpaid,
    /// Partly paid.
    #[sea_orm(string_value = "PARTIAL")]
    Partial,
    /// Fully paid.
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Cancelled.
    #[sea_orm(string_value = "VOID")]
    Void,
}

/// `payment_mode` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_mode")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Cash.
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Card.
    #[sea_orm(string_value = "CARD")]
    Card,
    /// UPI.
    #[sea_orm(string_value = "UPI")]
    Upi,
    /// Bank transfer.
    #[sea_orm(string_value = "BANK")]
    Bank,
    /// Other.
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl From<InvoiceStatus> for DomainInvoiceStatus {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Unpaid => Self::Unpaid,
            InvoiceStatus::Partial => Self::Partial,
            InvoiceStatus::Paid => Self::Paid,
            InvoiceStatus::Void => Self::Void,
        }
    }
}

impl From<DomainInvoiceStatus> for InvoiceStatus {
    fn from(status: DomainInvoiceStatus) -> Self {
        match status {
            DomainInvoiceStatus::Unpaid => Self::Unpaid,
            DomainInvoiceStatus::Partial => Self::Partial,
            DomainInvoiceStatus::Paid => Self::Paid,
            DomainInvoiceStatus::Void => Self::Void,
        }
    }
}

impl From<PaymentMode> for DomainPaymentMode {
    fn from(mode: PaymentMode) -> Self {
        match mode {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::Card => Self::Card,
            PaymentMode::Upi => Self::Upi,
            PaymentMode::Bank => Self::Bank,
            PaymentMode::Other => Self::Other,
        }
    }
}

impl From<DomainPaymentMode> for PaymentMode {
    fn from(mode: DomainPaymentMode) -> Self {
        match mode {
            DomainPaymentMode::Cash => Self::Cash,
            DomainPaymentMode::Card => Self::Card,
            DomainPaymentMode::Upi => Self::Upi,
            DomainPaymentMode::Bank => Self::Bank,
            DomainPaymentMode::Other => Self::Other,
        }
    }
}
