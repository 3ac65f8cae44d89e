use super::*;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal_macros::dec;

#[rstest]
#[case(dec!(10.005), dec!(10.01))]
#[case(dec!(10.004), dec!(10.00))]
#[case(dec!(0.005), dec!(0.01))]
#[case(dec!(0.004), dec!(0.00))]
#[case(dec!(2000), dec!(2000.00))]
#[case(dec!(-1.005), dec!(-1.01))]
fn test_round_money(#[case] input: Decimal, #[case] expected: Decimal) {
    assert_eq!(round_money(input), expected);
}

#[test]
fn test_round_money_always_has_two_places() {
    assert_eq!(round_money(dec!(5)).scale(), MONEY_SCALE);
    assert_eq!(round_money(dec!(5.1)).scale(), MONEY_SCALE);
    assert_eq!(round_money(dec!(5.123456)).scale(), MONEY_SCALE);
}

#[test]
fn test_format_money() {
    assert_eq!(format_money(dec!(5000)), "5000.00");
    assert_eq!(format_money(dec!(1234.5)), "1234.50");
    assert_eq!(format_money(dec!(-2000)), "-2000.00");
    assert_eq!(format_money(dec!(0.125)), "0.13");
}

proptest! {
    #[test]
    fn prop_round_money_is_idempotent(cents in -10_000_000i64..10_000_000i64, extra in 0i64..1000) {
        let amount = Decimal::new(cents * 1000 + extra, 5);
        let once = round_money(amount);
        prop_assert_eq!(round_money(once), once);
    }

    #[test]
    fn prop_round_money_moves_at_most_half_a_cent(mills in -10_000_000i64..10_000_000i64) {
        let amount = Decimal::new(mills, 3);
        let diff = (round_money(amount) - amount).abs();
        prop_assert!(diff <= dec!(0.005));
    }
}
