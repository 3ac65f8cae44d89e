//! Standalone receipt number allocation.

#![allow(clippy::unwrap_used)]

mod common;

use feeledger_core::payment::ReceiptNumber;
use feeledger_db::ReceiptSequenceRepository;

#[tokio::test]
async fn test_next_receipt_number_counts_up_within_a_month() {
    let Some(db) = common::try_connect().await else {
        return;
    };
    let period = ReceiptNumber::period_for(common::private_month());
    let first = common::next_receipt_sequence(&db, period).await;
    let repo = ReceiptSequenceRepository::new(db.clone());

    let mut issued = Vec::new();
    for _ in 0..3 {
        issued.push(repo.next_receipt_number(period).await.unwrap());
    }

    let sequences: Vec<u64> = issued.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, [first, first + 1, first + 2]);
    assert!(issued.iter().all(|r| r.period == period));
    if first == 1 {
        assert_eq!(issued[0].to_string(), format!("REC-{period}-000001"));
    }
}

#[tokio::test]
async fn test_next_receipt_number_keeps_months_apart() {
    let Some(db) = common::try_connect().await else {
        return;
    };
    let repo = ReceiptSequenceRepository::new(db.clone());
    let busy = ReceiptNumber::period_for(common::private_month());
    let other = loop {
        let candidate = ReceiptNumber::period_for(common::private_month());
        if candidate != busy {
            break candidate;
        }
    };
    let first_other = common::next_receipt_sequence(&db, other).await;

    repo.next_receipt_number(busy).await.unwrap();
    repo.next_receipt_number(busy).await.unwrap();
    let issued = repo.next_receipt_number(other).await.unwrap();

    assert_eq!(issued.period, other);
    assert_eq!(issued.sequence, first_other);
}
