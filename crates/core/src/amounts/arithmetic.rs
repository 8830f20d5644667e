//! Fixed-point percentage and basis-point arithmetic.
//!
//! CRITICAL: Rounding strategy for apportionment and tax:
//! - Inputs and outputs are integer minor units (cents)
//! - The exact rational result is rounded half away from zero
//! - NOT banker's rounding: 2.5 rounds to 3, 1.5 rounds to 2

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// One hundred percent.
pub const FULL_PERCENT: u8 = 100;

/// One hundred percent expressed in basis points.
pub const FULL_BPS: u16 = 10_000;

/// Divides and rounds half away from zero to a whole number of minor units.
///
/// Callers guarantee `|numerator / denominator| <= |amount|` for some `i64`
/// amount, so the conversion back to `i64` cannot overflow. Breaking that
/// contract panics in debug builds and yields 0 in release builds.
fn round_ratio(numerator: Decimal, denominator: Decimal) -> i64 {
    let rounded = (numerator / denominator)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let result = rounded.to_i64();
    debug_assert!(result.is_some(), "rounded ratio out of i64 range: {rounded}");
    result.unwrap_or(0)
}

/// Returns `percent`% of `amount`.
///
/// # Example
///
/// ```
/// use tally_core::amounts::percent_part;
///
/// assert_eq!(percent_part(34132, 7), 2389); // 2389.24
/// assert_eq!(percent_part(34132, 8), 2731); // 2730.56
/// ```
#[must_use]
pub fn percent_part(amount: i64, percent: u8) -> i64 {
    debug_assert!(percent <= FULL_PERCENT, "percent out of range: {percent}");
    match percent {
        0 => 0,
        FULL_PERCENT => amount,
        _ => round_ratio(
            Decimal::from(amount) * Decimal::from(percent),
            Decimal::from(FULL_PERCENT),
        ),
    }
}

/// Returns `bps` basis points of `amount`.
#[must_use]
pub fn bps_part(amount: i64, bps: u16) -> i64 {
    debug_assert!(bps <= FULL_BPS, "bps out of range: {bps}");
    round_ratio(
        Decimal::from(amount) * Decimal::from(bps),
        Decimal::from(FULL_BPS),
    )
}

/// Returns the pre-tax base contained in a tax-inclusive amount.
///
/// The result `B` satisfies `B + bps_part(B, bps) ≈ tax_inclusive_amount`
/// within one minor unit.
///
/// # Example
///
/// ```
/// use tally_core::amounts::bps_base_part;
///
/// assert_eq!(bps_base_part(7500, 1000), 6818); // 6818.18
/// assert_eq!(bps_base_part(7500, 2), 7499); // 7498.50029994
/// ```
#[must_use]
pub fn bps_base_part(tax_inclusive_amount: i64, bps: u16) -> i64 {
    debug_assert!(bps <= FULL_BPS, "bps out of range: {bps}");
    if bps == 0 {
        return tax_inclusive_amount;
    }
    round_ratio(
        Decimal::from(tax_inclusive_amount) * Decimal::from(FULL_BPS),
        Decimal::from(FULL_BPS) + Decimal::from(bps),
    )
}
