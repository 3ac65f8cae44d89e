//! Property-based tests for receipt numbers.

use proptest::prelude::*;

use super::receipt::ReceiptNumber;
use crate::billing::BillingPeriod;

fn period() -> impl Strategy<Value = BillingPeriod> {
    (2000i32..2100i32, 1u32..=12u32).prop_map(|(y, m)| BillingPeriod::new(y, m).unwrap())
}

proptest! {
    /// Formatting then parsing yields the same receipt.
    #[test]
    fn prop_display_parses_back(period in period(), sequence in 1u64..10_000_000u64) {
        let receipt = ReceiptNumber::new(period, sequence);
        let parsed: ReceiptNumber = receipt.to_string().parse().unwrap();
        prop_assert_eq!(parsed, receipt);
    }

    /// Within a period, the string order of receipts below a million follows
    /// their sequence order.
    #[test]
    fn prop_padded_numbers_sort_lexically(
        period in period(),
        a in 1u64..1_000_000u64,
        b in 1u64..1_000_000u64,
    ) {
        let ra = ReceiptNumber::new(period, a).to_string();
        let rb = ReceiptNumber::new(period, b).to_string();
        prop_assert_eq!(ra.cmp(&rb), a.cmp(&b));
    }

    /// Consecutive counter values issue consecutive receipts.
    #[test]
    fn prop_counter_values_are_gapless(period in period(), start in 2i64..1_000_000i64, n in 1usize..50) {
        let issued: Vec<u64> = (0..n)
            .map(|i| {
                let next = start + i64::try_from(i).unwrap();
                ReceiptNumber::issued_from_counter(period, next).unwrap().sequence
            })
            .collect();
        for pair in issued.windows(2) {
            prop_assert_eq!(pair[1], pair[0] + 1);
        }
    }
}
