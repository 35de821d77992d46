//! Unit tests for the Money module
//!
//! Tests cover construction, arithmetic, half-up rounding, rate application,
//! and currency handling.

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::USD);
    }

    #[test]
    fn test_new_keeps_four_internal_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::USD);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_cents() {
        let m = Money::from_minor(10050, Currency::USD);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_zero_is_zero_in_any_currency() {
        let m = Money::zero(Currency::INR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_sign_predicates() {
        assert!(Money::new(dec!(0.01), Currency::USD).is_positive());
        assert!(Money::new(dec!(-0.01), Currency::USD).is_negative());
        assert!(!Money::zero(Currency::USD).is_positive());
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // banker's rounding would give 2.34 here
        let m = Money::new(dec!(2.345), Currency::USD);
        assert_eq!(m.round_half_up().amount(), dec!(2.35));
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        let m = Money::new(dec!(-2.345), Currency::USD);
        assert_eq!(m.round_half_up().amount(), dec!(-2.35));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        let m = Money::new(dec!(2.3449), Currency::USD);
        assert_eq!(m.round_half_up().amount(), dec!(2.34));
    }

    #[test]
    fn test_rounding_preserves_currency() {
        let m = Money::new(dec!(1.005), Currency::INR).round_half_up();
        assert_eq!(m.currency(), Currency::INR);
        assert_eq!(m.amount(), dec!(1.01));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(100.00), Currency::USD);
        let b = Money::new(dec!(50.25), Currency::USD);
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.amount(), dec!(150.25));
    }

    #[test]
    fn test_checked_add_rejects_currency_mismatch() {
        let usd = Money::new(dec!(100.00), Currency::USD);
        let inr = Money::new(dec!(100.00), Currency::INR);
        let err = usd.checked_add(&inr).unwrap_err();
        assert!(matches!(err, MoneyError::CurrencyMismatch(_, _)));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(10.00), Currency::USD);
        let b = Money::new(dec!(25.00), Currency::USD);
        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff.amount(), dec!(-15.00));
    }

    #[test]
    fn test_operator_add_and_sub() {
        let a = Money::new(dec!(49.05), Currency::USD);
        let b = Money::new(dec!(0.95), Currency::USD);
        assert_eq!((a + b).amount(), dec!(50.00));
        assert_eq!((a - b).amount(), dec!(48.10));
    }

    #[test]
    fn test_neg_flips_sign() {
        let m = -Money::new(dec!(0.60), Currency::USD);
        assert_eq!(m.amount(), dec!(-0.60));
    }

    #[test]
    fn test_multiply_by_decimal() {
        let m = Money::new(dec!(50.00), Currency::USD) * dec!(0.012);
        assert_eq!(m.amount(), dec!(0.60));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_from_percentage() {
        let rate = Rate::from_percentage(dec!(1.2));
        assert_eq!(rate.as_decimal(), dec!(0.012));
        assert_eq!(rate.as_percentage(), dec!(1.2));
    }

    #[test]
    fn test_rate_apply_scales_amount() {
        let rate = Rate::new(dec!(0.007));
        let base = Money::new(dec!(50.00), Currency::USD);
        assert_eq!(rate.apply(&base).amount(), dec!(0.35));
    }

    #[test]
    fn test_rate_display_shows_percentage() {
        let shown = Rate::new(dec!(0.012)).to_string();
        assert!(shown.starts_with("1.2"));
        assert!(shown.ends_with('%'));
    }
}

mod display {
    use super::*;

    #[test]
    fn test_display_uses_symbol_and_two_places() {
        let m = Money::new(dec!(49.05), Currency::USD);
        assert_eq!(m.to_string(), "$ 49.05");
    }

    #[test]
    fn test_inr_symbol() {
        let m = Money::new(dec!(1000), Currency::INR);
        assert_eq!(m.to_string(), "₹ 1000.00");
    }
}

mod serde_format {
    use super::*;

    #[test]
    fn test_currency_serializes_as_iso_code() {
        assert_eq!(serde_json::to_string(&Currency::USD).unwrap(), "\"USD\"");
        let parsed: Currency = serde_json::from_str("\"INR\"").unwrap();
        assert_eq!(parsed, Currency::INR);
    }
}
