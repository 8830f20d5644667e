//! Amounts in the workspace default currency.
//!
//! This module implements the numeric half of record normalization:
//! - Fixed-point percent and basis-point arithmetic
//! - Tri-state amounts and amount pairs
//! - Resolution of the converted and income-taxable pairs

pub mod arithmetic;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod arithmetic_props;

pub use arithmetic::{FULL_BPS, FULL_PERCENT, bps_base_part, bps_part, percent_part};
pub use resolver::{DualAmountResolver, ResolvedAmounts};
pub use types::{Amount, AmountsInDefaultCurrency};
