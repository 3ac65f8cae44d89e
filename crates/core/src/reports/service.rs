//! Report generation service.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use feeledger_shared::types::{FeeHeadId, InvoiceId, StudentId, round_money};
use rust_decimal::Decimal;

use super::types::{
    ClassBreakdown, FeeReport, HeadBreakdown, InvoiceFigures, ItemFigures, ReportFilter,
    ReportSummary,
};
use crate::invoice::InvoiceStatus;

/// Service for generating fee reports.
pub struct ReportService;

#[derive(Default)]
struct ClassAccumulator {
    billed: Decimal,
    collected: Decimal,
    outstanding: Decimal,
    students: BTreeSet<StudentId>,
}

struct HeadAccumulator {
    name: String,
    billed: Decimal,
    collected: Decimal,
    outstanding: Decimal,
}

impl ReportService {
    /// Generates the collection report.
    ///
    /// `invoices` and `items` are expected to be pre-filtered by period and
    /// class; void invoices are skipped here regardless. Items whose invoice
    /// is not in `invoices` are ignored.
    #[must_use]
    pub fn generate_fee_report(
        filters: ReportFilter,
        invoices: &[InvoiceFigures],
        items: &[ItemFigures],
    ) -> FeeReport {
        let counted: Vec<&InvoiceFigures> = invoices
            .iter()
            .filter(|inv| inv.status != InvoiceStatus::Void)
            .collect();

        let summary = Self::summarize(&counted);
        let by_class = Self::by_class(&counted);

        let lookup: HashMap<InvoiceId, &InvoiceFigures> =
            counted.iter().map(|inv| (inv.invoice_id, *inv)).collect();
        let by_head = Self::by_head(&lookup, items, filters.head_id);

        FeeReport {
            filters,
            summary,
            by_class,
            by_head,
        }
    }

    fn summarize(invoices: &[&InvoiceFigures]) -> ReportSummary {
        ReportSummary {
            total_billed: round_money(invoices.iter().map(|i| i.billed_total).sum()),
            total_collected: round_money(invoices.iter().map(|i| i.paid_total).sum()),
            total_outstanding: round_money(invoices.iter().map(|i| i.balance).sum()),
            invoice_count: invoices.len() as u64,
        }
    }

    fn by_class(invoices: &[&InvoiceFigures]) -> Vec<ClassBreakdown> {
        let mut groups: BTreeMap<&str, ClassAccumulator> = BTreeMap::new();
        for inv in invoices {
            let acc = groups.entry(inv.class_label.as_str()).or_default();
            acc.billed += inv.billed_total;
            acc.collected += inv.paid_total;
            acc.outstanding += inv.balance;
            acc.students.insert(inv.student_id);
        }

        groups
            .into_iter()
            .map(|(class_label, acc)| ClassBreakdown {
                class_label: class_label.to_string(),
                billed: round_money(acc.billed),
                collected: round_money(acc.collected),
                outstanding: round_money(acc.outstanding),
                student_count: acc.students.len() as u64,
            })
            .collect()
    }

    fn by_head(
        invoices: &HashMap<InvoiceId, &InvoiceFigures>,
        items: &[ItemFigures],
        head_filter: Option<FeeHeadId>,
    ) -> Vec<HeadBreakdown> {
        let mut groups: BTreeMap<FeeHeadId, HeadAccumulator> = BTreeMap::new();

        for item in items {
            if head_filter.is_some_and(|h| h != item.head_id) {
                continue;
            }
            let Some(invoice) = invoices.get(&item.invoice_id) else {
                continue;
            };
            let acc = groups.entry(item.head_id).or_insert_with(|| HeadAccumulator {
                name: item.head_name.clone(),
                billed: Decimal::ZERO,
                collected: Decimal::ZERO,
                outstanding: Decimal::ZERO,
            });
            acc.billed += item.amount;
            acc.collected += Self::apportion(item.amount, invoice.billed_total, invoice.paid_total);
            acc.outstanding += Self::apportion(item.amount, invoice.billed_total, invoice.balance);
        }

        let mut rows: Vec<HeadBreakdown> = groups
            .into_iter()
            .map(|(head_id, acc)| HeadBreakdown {
                head_id,
                head_name: acc.name,
                billed: round_money(acc.billed),
                collected: round_money(acc.collected),
                outstanding: round_money(acc.outstanding),
            })
            .collect();
        rows.sort_by(|a, b| a.head_name.cmp(&b.head_name).then(a.head_id.cmp(&b.head_id)));
        rows
    }

    /// The item's share of `portion`, capped at the item amount.
    ///
    /// The share is `amount / billed_total`. Zero when there is nothing to
    /// apportion or the invoice billed nothing.
    #[must_use]
    pub fn apportion(amount: Decimal, billed_total: Decimal, portion: Decimal) -> Decimal {
        if portion <= Decimal::ZERO || billed_total <= Decimal::ZERO {
            return round_money(Decimal::ZERO);
        }
        let share = amount
            .checked_mul(portion)
            .and_then(|v| v.checked_div(billed_total))
            .unwrap_or(amount);
        round_money(share.min(amount))
    }
}
