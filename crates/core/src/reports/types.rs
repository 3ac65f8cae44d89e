//! Report types.

use feeledger_shared::types::{FeeHeadId, InvoiceId, StudentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::billing::BillingPeriod;
use crate::invoice::InvoiceStatus;

/// Raw report filters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// `YYYY-MM`.
    pub month: Option<String>,
    /// Class label.
    pub class: Option<String>,
    /// Fee head id.
    pub head_id: Option<String>,
}

/// Parsed report filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportFilter {
    /// Restricts every figure to one period.
    pub period: Option<BillingPeriod>,
    /// Restricts every figure to one class.
    pub class_label: Option<String>,
    /// Restricts the by-head breakdown to one head.
    pub head_id: Option<FeeHeadId>,
}

impl ReportFilter {
    /// Parses raw filters; blank values count as absent.
    pub fn from_query(query: ReportQuery) -> Result<Self, ReportError> {
        let period = non_blank(query.month)
            .map(|m| m.parse().map_err(|_| ReportError::InvalidPeriod(m)))
            .transpose()?;
        let head_id = non_blank(query.head_id)
            .map(|h| h.parse().map_err(|_| ReportError::InvalidHeadId(h)))
            .transpose()?;

        Ok(Self {
            period,
            class_label: non_blank(query.class),
            head_id,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Invoice figures feeding a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFigures {
    /// Invoice id.
    pub invoice_id: InvoiceId,
    /// Billed student.
    pub student_id: StudentId,
    /// Class at generation time.
    pub class_label: String,
    /// Billed total.
    pub billed_total: Decimal,
    /// Paid total.
    pub paid_total: Decimal,
    /// Outstanding balance.
    pub balance: Decimal,
    /// Current status.
    pub status: InvoiceStatus,
}

/// Invoice item figures feeding the by-head breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFigures {
    /// Owning invoice.
    pub invoice_id: InvoiceId,
    /// Fee head.
    pub head_id: FeeHeadId,
    /// Head name snapshot.
    pub head_name: String,
    /// Line amount.
    pub amount: Decimal,
}

/// Report totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of billed totals.
    pub total_billed: Decimal,
    /// Sum of paid totals.
    pub total_collected: Decimal,
    /// Sum of balances.
    pub total_outstanding: Decimal,
    /// Number of invoices counted.
    pub invoice_count: u64,
}

/// Figures for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    /// Class label.
    pub class_label: String,
    /// Sum of billed totals.
    pub billed: Decimal,
    /// Sum of paid totals.
    pub collected: Decimal,
    /// Sum of balances.
    pub outstanding: Decimal,
    /// Distinct students invoiced.
    pub student_count: u64,
}

/// Figures for one fee head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadBreakdown {
    /// Head id.
    pub head_id: FeeHeadId,
    /// Head name.
    pub head_name: String,
    /// Sum of item amounts.
    pub billed: Decimal,
    /// Apportioned collections.
    pub collected: Decimal,
    /// Apportioned balances.
    pub outstanding: Decimal,
}

/// The complete fee collection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeReport {
    /// Filters the report was built with.
    pub filters: ReportFilter,
    /// Totals.
    pub summary: ReportSummary,
    /// Per-class figures, ordered by class label.
    pub by_class: Vec<ClassBreakdown>,
    /// Per-head figures, ordered by head name.
    pub by_head: Vec<HeadBreakdown>,
}
