//! Tests for the report service.

use feeledger_shared::types::{FeeHeadId, InvoiceId, StudentId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{InvoiceFigures, ItemFigures, ReportFilter, ReportQuery};
use crate::invoice::{InvoiceAggregator, InvoiceStatus};

fn invoice(class_label: &str, student_id: StudentId, billed: Decimal, paid: Decimal) -> InvoiceFigures {
    let totals = InvoiceAggregator::recompute(billed, paid);
    InvoiceFigures {
        invoice_id: InvoiceId::new(),
        student_id,
        class_label: class_label.to_string(),
        billed_total: totals.billed_total,
        paid_total: totals.paid_total,
        balance: totals.balance,
        status: totals.status,
    }
}

fn item(invoice_id: InvoiceId, head_id: FeeHeadId, name: &str, amount: Decimal) -> ItemFigures {
    ItemFigures {
        invoice_id,
        head_id,
        head_name: name.to_string(),
        amount,
    }
}

#[test]
fn test_summary_and_class_breakdown() {
    let s1 = StudentId::new();
    let s2 = StudentId::new();
    let invoices = vec![
        invoice("5A", s1, dec!(5000), dec!(2000)),
        invoice("5A", s2, dec!(5000), dec!(5000)),
        invoice("4B", StudentId::new(), dec!(3000), dec!(0)),
    ];

    let report = ReportService::generate_fee_report(ReportFilter::default(), &invoices, &[]);

    assert_eq!(report.summary.total_billed, dec!(13000));
    assert_eq!(report.summary.total_collected, dec!(7000));
    assert_eq!(report.summary.total_outstanding, dec!(6000));
    assert_eq!(report.summary.invoice_count, 3);

    assert_eq!(report.by_class.len(), 2);
    assert_eq!(report.by_class[0].class_label, "4B");
    assert_eq!(report.by_class[1].class_label, "5A");
    assert_eq!(report.by_class[1].student_count, 2);
    assert_eq!(report.by_class[1].outstanding, dec!(3000));
}

#[test]
fn test_void_invoices_are_excluded() {
    let mut voided = invoice("5A", StudentId::new(), dec!(5000), dec!(0));
    voided.status = InvoiceStatus::Void;
    let head = FeeHeadId::new();
    let items = vec![item(voided.invoice_id, head, "Tuition", dec!(5000))];

    let report = ReportService::generate_fee_report(ReportFilter::default(), &[voided], &items);

    assert_eq!(report.summary.total_billed, dec!(0));
    assert!(report.by_class.is_empty());
    assert!(report.by_head.is_empty());
}

#[test]
fn test_head_apportionment() {
    let inv = invoice("5A", StudentId::new(), dec!(5000), dec!(2000));
    let tuition = FeeHeadId::new();
    let transport = FeeHeadId::new();
    let items = vec![
        item(inv.invoice_id, tuition, "Tuition", dec!(4000)),
        item(inv.invoice_id, transport, "Transport", dec!(1000)),
    ];

    let report = ReportService::generate_fee_report(ReportFilter::default(), &[inv], &items);

    assert_eq!(report.by_head.len(), 2);
    let t = &report.by_head[0];
    assert_eq!(t.head_name, "Transport");
    assert_eq!(t.billed, dec!(1000));
    assert_eq!(t.collected, dec!(400));
    assert_eq!(t.outstanding, dec!(600));
    let u = &report.by_head[1];
    assert_eq!(u.head_name, "Tuition");
    assert_eq!(u.collected, dec!(1600));
    assert_eq!(u.outstanding, dec!(2400));
}

#[test]
fn test_head_filter_only_restricts_head_breakdown() {
    let inv = invoice("5A", StudentId::new(), dec!(5000), dec!(0));
    let tuition = FeeHeadId::new();
    let items = vec![
        item(inv.invoice_id, tuition, "Tuition", dec!(4000)),
        item(inv.invoice_id, FeeHeadId::new(), "Transport", dec!(1000)),
    ];
    let filters = ReportFilter {
        head_id: Some(tuition),
        ..ReportFilter::default()
    };

    let report = ReportService::generate_fee_report(filters, &[inv], &items);

    assert_eq!(report.summary.total_billed, dec!(5000));
    assert_eq!(report.by_head.len(), 1);
    assert_eq!(report.by_head[0].head_id, tuition);
}

#[test]
fn test_overpaid_invoice_caps_collection_at_item_amount() {
    // Regenerated below what was already paid.
    let inv = invoice("5A", StudentId::new(), dec!(1000), dec!(1500));
    let head = FeeHeadId::new();
    let items = vec![item(inv.invoice_id, head, "Tuition", dec!(1000))];

    let report = ReportService::generate_fee_report(ReportFilter::default(), &[inv], &items);

    assert_eq!(report.by_head[0].collected, dec!(1000));
    assert_eq!(report.by_head[0].outstanding, dec!(0));
}

#[test]
fn test_filter_parsing() {
    let head = FeeHeadId::new();
    let filter = ReportFilter::from_query(ReportQuery {
        month: Some("2024-01".into()),
        class: Some(" ".into()),
        head_id: Some(head.to_string()),
    })
    .unwrap();
    assert_eq!(filter.period.map(|p| p.to_string()), Some("2024-01".to_string()));
    assert_eq!(filter.class_label, None);
    assert_eq!(filter.head_id, Some(head));

    assert!(matches!(
        ReportFilter::from_query(ReportQuery {
            month: Some("Jan 2024".into()),
            ..ReportQuery::default()
        }),
        Err(ReportError::InvalidPeriod(_))
    ));
    assert!(matches!(
        ReportFilter::from_query(ReportQuery {
            head_id: Some("42".into()),
            ..ReportQuery::default()
        }),
        Err(ReportError::InvalidHeadId(_))
    ));
}

proptest! {
    /// Apportioned collections never exceed the item amount nor go negative.
    #[test]
    fn prop_apportion_is_bounded(
        amount in 0i64..1_000_000i64,
        extra in 0i64..1_000_000i64,
        paid in 0i64..3_000_000i64,
    ) {
        let amount = Decimal::new(amount, 2);
        let billed = amount + Decimal::new(extra, 2);
        let share = ReportService::apportion(amount, billed, Decimal::new(paid, 2));
        prop_assert!(share >= Decimal::ZERO);
        prop_assert!(share <= amount);
    }

    /// Summary outstanding always equals billed minus collected.
    #[test]
    fn prop_summary_balances(
        rows in proptest::collection::vec((1i64..1_000_000i64, 0i64..1_000_000i64), 0..20),
    ) {
        let invoices: Vec<InvoiceFigures> = rows
            .into_iter()
            .map(|(billed, paid)| {
                invoice("5A", StudentId::new(), Decimal::new(billed, 2), Decimal::new(paid.min(billed), 2))
            })
            .collect();
        let report = ReportService::generate_fee_report(ReportFilter::default(), &invoices, &[]);
        prop_assert_eq!(
            report.summary.total_outstanding,
            report.summary.total_billed - report.summary.total_collected
        );
    }
}
