//! Property-based tests for record normalization.
//!
//! - Default-currency records are never pending conversion
//! - Same-rate records carry identical pairs
//! - Pending conversion dominates the status
//! - Normalization is idempotent and its output passes the stored-record check

use proptest::prelude::*;

use tally_shared::types::{CurrencyCode, GeneralTaxId};

use super::normalizer::{NormalizationContext, normalize_amounts, validate_persisted_amounts};
use super::status::FinancialRecordStatus;
use super::types::{RecordAmounts, RecordKind};
use crate::amounts::{Amount, AmountsInDefaultCurrency, FULL_BPS, FULL_PERCENT};

fn default_currency() -> CurrencyCode {
    "USD".parse().unwrap()
}

fn record_currency() -> impl Strategy<Value = CurrencyCode> {
    prop_oneof![Just("USD"), Just("EUR"), Just("JPY")]
        .prop_map(|code| code.parse().unwrap())
}

fn kind() -> impl Strategy<Value = RecordKind> {
    prop_oneof![Just(RecordKind::Expense), Just(RecordKind::Income)]
}

/// Strategy to generate amounts that pass input validation.
///
/// Only default-currency records can conflict, so their caller values are
/// kept consistent with `original_amount`. Foreign-currency records keep
/// arbitrary, possibly stale, taxable originals even in same-rate mode.
fn valid_amounts() -> impl Strategy<Value = RecordAmounts> {
    (
        record_currency(),
        0i64..1_000_000_000i64,
        proptest::option::of(0i64..1_000_000_000i64),
        proptest::option::of(0i64..1_000_000_000i64),
        proptest::option::of(0i64..1_000_000_000i64),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(currency, original, converted, taxable, stale_adjusted, different_rate, taxed)| {
                let in_default = currency == default_currency();
                let converted = if in_default {
                    converted.map(|_| original)
                } else {
                    converted
                };
                let taxable = if in_default && !different_rate {
                    taxable.map(|_| original)
                } else {
                    taxable
                };

                RecordAmounts {
                    converted_amounts: AmountsInDefaultCurrency::from_options(
                        converted,
                        stale_adjusted,
                    ),
                    income_taxable_amounts: AmountsInDefaultCurrency::from_options(
                        taxable,
                        stale_adjusted,
                    ),
                    use_different_exchange_rate_for_income_tax_purposes: different_rate,
                    general_tax_id: taxed.then(GeneralTaxId::new),
                    ..RecordAmounts::new(currency, original)
                }
            },
        )
}

/// Strategy to generate valid same-rate amounts.
fn same_rate_amounts() -> impl Strategy<Value = RecordAmounts> {
    valid_amounts()
        .prop_filter("same-rate records only", |amounts| {
            !amounts.use_different_exchange_rate_for_income_tax_purposes
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// *For any* default-currency record, the status is never pending
    /// conversion and the converted original equals the original amount.
    #[test]
    fn prop_default_currency_is_converted(
        kind in kind(),
        amounts in valid_amounts(),
        percent in 0u8..=FULL_PERCENT,
        rate in 0u16..=FULL_BPS,
    ) {
        let default_currency = default_currency();
        let amounts = RecordAmounts { currency: default_currency.clone(), ..amounts };
        let amounts = RecordAmounts {
            converted_amounts: AmountsInDefaultCurrency::pending(),
            income_taxable_amounts: if amounts.use_different_exchange_rate_for_income_tax_purposes {
                amounts.income_taxable_amounts
            } else {
                AmountsInDefaultCurrency::pending()
            },
            ..amounts
        };
        let context = NormalizationContext {
            default_currency: &default_currency,
            general_tax_rate_in_bps: Some(rate),
        };

        let result = normalize_amounts(kind, &amounts, percent, &context);
        prop_assert!(result.is_ok(), "unexpected violation: {:?}", result);
        let result = result.unwrap();

        prop_assert_ne!(result.status, FinancialRecordStatus::PendingConversion);
        prop_assert_eq!(
            result.converted_amounts.original,
            Amount::Known(amounts.original_amount)
        );
    }

    /// *For any* same-rate record, whatever taxable pair the caller supplied,
    /// the taxable pair ends equal to the converted pair.
    #[test]
    fn prop_same_rate_pairs_are_equal(
        kind in kind(),
        amounts in same_rate_amounts(),
        percent in 0u8..=FULL_PERCENT,
        rate in 0u16..=FULL_BPS,
    ) {
        let default_currency = default_currency();
        let context = NormalizationContext {
            default_currency: &default_currency,
            general_tax_rate_in_bps: Some(rate),
        };

        let result = normalize_amounts(kind, &amounts, percent, &context);
        prop_assert!(result.is_ok(), "unexpected violation: {:?}", result);
        let result = result.unwrap();

        prop_assert_eq!(result.converted_amounts, result.income_taxable_amounts);
        prop_assert_eq!(
            result.converted_amounts.original,
            if amounts.currency == default_currency {
                Amount::Known(amounts.original_amount)
            } else {
                amounts.converted_amounts.original
            }
        );
        prop_assert_ne!(
            result.status,
            FinancialRecordStatus::PendingConversionForTaxationPurposes
        );
    }

    /// *For any* valid record, the status follows which originals are known,
    /// and only finalized records carry a general tax amount.
    #[test]
    fn prop_status_dominance(
        kind in kind(),
        amounts in valid_amounts(),
        percent in 0u8..=FULL_PERCENT,
        rate in 0u16..=FULL_BPS,
    ) {
        let default_currency = default_currency();
        let context = NormalizationContext {
            default_currency: &default_currency,
            general_tax_rate_in_bps: Some(rate),
        };

        let result = normalize_amounts(kind, &amounts, percent, &context);
        prop_assert!(result.is_ok(), "unexpected violation: {:?}", result);
        let result = result.unwrap();

        let expected = if !result.converted_amounts.original.is_known() {
            FinancialRecordStatus::PendingConversion
        } else if !result.income_taxable_amounts.original.is_known() {
            FinancialRecordStatus::PendingConversionForTaxationPurposes
        } else {
            FinancialRecordStatus::Finalized
        };
        prop_assert_eq!(result.status, expected);

        if result.status.is_finalized() {
            prop_assert!(result.converted_amounts.is_resolved());
            prop_assert!(result.income_taxable_amounts.is_resolved());
            prop_assert_eq!(result.general_tax_amount.is_some(), amounts.general_tax_id.is_some());
        } else {
            prop_assert_eq!(result.general_tax_amount, None);
            prop_assert_eq!(result.general_tax_rate_in_bps, None);
        }
    }

    /// *For any* valid record, normalizing twice gives the same result, and
    /// the result passes the stored-record check.
    #[test]
    fn prop_normalization_is_idempotent(
        kind in kind(),
        amounts in valid_amounts(),
        percent in 0u8..=FULL_PERCENT,
        rate in 0u16..=FULL_BPS,
    ) {
        let default_currency = default_currency();
        let context = NormalizationContext {
            default_currency: &default_currency,
            general_tax_rate_in_bps: Some(rate),
        };

        let once = normalize_amounts(kind, &amounts, percent, &context);
        prop_assert!(once.is_ok(), "unexpected violation: {:?}", once);
        let once = once.unwrap();
        let twice = normalize_amounts(kind, &once, percent, &context);

        prop_assert_eq!(twice.as_ref(), Ok(&once));
        prop_assert_eq!(validate_persisted_amounts(kind, &once, &default_currency), Ok(()));
    }
}
