//! Property-based tests for fixed-point arithmetic.
//!
//! - Rounding law: results are within half a unit, ties away from zero
//! - Basis points agree with whole percents
//! - Tax base back-calculation round-trips within one unit

use proptest::prelude::*;

use super::arithmetic::{FULL_BPS, FULL_PERCENT, bps_base_part, bps_part, percent_part};

/// Strategy to generate non-negative amounts in minor units (0 to 1 trillion).
fn amount() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000_000i64
}

fn percent() -> impl Strategy<Value = u8> {
    0u8..=FULL_PERCENT
}

fn bps() -> impl Strategy<Value = u16> {
    0u16..=FULL_BPS
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// *For any* amount and percent, `percent_part` is within 0.5 of the
    /// exact value and exact halves round up.
    #[test]
    fn prop_percent_part_rounding_law(amount in amount(), percent in percent()) {
        let exact_times_100 = i128::from(amount) * i128::from(percent);
        let result_times_100 = i128::from(percent_part(amount, percent)) * 100;
        let diff = result_times_100 - exact_times_100;

        prop_assert!((-50..=50).contains(&diff), "diff {} out of range", diff);
        if exact_times_100 % 100 == 50 {
            prop_assert_eq!(diff, 50, "tie must round away from zero");
        }
    }

    /// *For any* amount and percent, `bps_part(a, p * 100) == percent_part(a, p)`.
    #[test]
    fn prop_bps_agrees_with_percent(amount in amount(), percent in percent()) {
        prop_assert_eq!(
            bps_part(amount, u16::from(percent) * 100),
            percent_part(amount, percent)
        );
    }

    /// *For any* tax-inclusive amount and rate, base plus tax on base lands
    /// within one minor unit of the tax-inclusive amount.
    #[test]
    fn prop_tax_base_round_trip(tax_inclusive in amount(), bps in bps()) {
        let base = bps_base_part(tax_inclusive, bps);
        let rebuilt = base + bps_part(base, bps);
        prop_assert!(
            (rebuilt - tax_inclusive).abs() <= 1,
            "base {} + tax {} = {} vs {}",
            base, bps_part(base, bps), rebuilt, tax_inclusive
        );
    }

    /// *For any* amount and rate, the base never exceeds the tax-inclusive
    /// amount and the implied tax is never negative.
    #[test]
    fn prop_tax_base_bounded(tax_inclusive in amount(), bps in bps()) {
        let base = bps_base_part(tax_inclusive, bps);
        prop_assert!(base <= tax_inclusive);
        prop_assert!(base >= 0);
    }

    /// Percent part is monotonic in the percent.
    #[test]
    fn prop_percent_part_monotonic(amount in amount(), percent in 0u8..FULL_PERCENT) {
        prop_assert!(percent_part(amount, percent) <= percent_part(amount, percent + 1));
    }
}
