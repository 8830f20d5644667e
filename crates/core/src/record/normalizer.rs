//! Record normalization: the pure part of saving an expense or income.
//!
//! `normalize` runs, in order:
//! 1. Consistency validation of the caller-supplied record
//! 2. Resolution of the converted and income-taxable pairs
//! 3. Status classification
//! 4. General tax back-calculation (finalized records only)
//! 5. A final check that finalized records carry every amount
//!
//! It has no state and performs no I/O; identical inputs give identical
//! outputs.

use tally_shared::types::CurrencyCode;

use super::error::ConsistencyViolation;
use super::status::FinancialRecordStatus;
use super::tax::apply_general_tax;
use super::types::{FinancialRecord, RecordAmounts, RecordKind};
use crate::amounts::{Amount, DualAmountResolver, FULL_BPS, FULL_PERCENT};

/// Workspace facts the normalizer needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct NormalizationContext<'a> {
    /// Workspace home currency.
    pub default_currency: &'a CurrencyCode,
    /// Rate of the attached general tax, resolved by the caller.
    pub general_tax_rate_in_bps: Option<u16>,
}

/// Normalizes a record, returning a new value ready to persist.
///
/// # Errors
///
/// Returns a `ConsistencyViolation` if the record breaks an invariant.
pub fn normalize<T: FinancialRecord>(
    record: T,
    context: &NormalizationContext<'_>,
) -> Result<T, ConsistencyViolation> {
    let amounts = normalize_amounts(
        T::KIND,
        record.amounts(),
        record.percent_on_business(),
        context,
    )?;
    Ok(record.with_amounts(amounts))
}

/// Normalizes the monetary fields of a record of the given kind.
///
/// # Errors
///
/// Returns a `ConsistencyViolation` if the amounts break an invariant.
pub fn normalize_amounts(
    kind: RecordKind,
    amounts: &RecordAmounts,
    percent_on_business: u8,
    context: &NormalizationContext<'_>,
) -> Result<RecordAmounts, ConsistencyViolation> {
    let resolver = DualAmountResolver {
        original_amount: amounts.original_amount,
        in_default_currency: amounts.currency == *context.default_currency,
        percent_on_business,
        use_different_exchange_rate_for_income_tax_purposes: amounts
            .use_different_exchange_rate_for_income_tax_purposes,
    };

    validate_input(amounts, &resolver, context)?;

    let resolved = resolver.resolve(&amounts.converted_amounts, &amounts.income_taxable_amounts);
    let status = FinancialRecordStatus::classify(&resolved.converted, &resolved.income_taxable);
    let rate = amounts.general_tax_id.and(context.general_tax_rate_in_bps);
    let applied = apply_general_tax(resolved, status, rate);

    let normalized = RecordAmounts {
        converted_amounts: applied.amounts.converted,
        income_taxable_amounts: applied.amounts.income_taxable,
        general_tax_rate_in_bps: applied.general_tax_rate_in_bps,
        general_tax_amount: applied.general_tax_amount,
        status,
        ..amounts.clone()
    };

    verify_finalized(kind, &normalized)?;
    Ok(normalized)
}

/// Re-checks the invariants of a record loaded from storage.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_persisted<T: FinancialRecord>(
    record: &T,
    default_currency: &CurrencyCode,
) -> Result<(), ConsistencyViolation> {
    validate_persisted_amounts(T::KIND, record.amounts(), default_currency)
}

/// Re-checks the invariants of stored monetary fields.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_persisted_amounts(
    kind: RecordKind,
    amounts: &RecordAmounts,
    default_currency: &CurrencyCode,
) -> Result<(), ConsistencyViolation> {
    let converted = &amounts.converted_amounts;
    let taxable = &amounts.income_taxable_amounts;

    if !converted.is_consistent() || !taxable.is_consistent() {
        return Err(ConsistencyViolation::AdjustedWithoutOriginal);
    }

    if amounts.currency == *default_currency
        && converted.original != Amount::Known(amounts.original_amount)
    {
        return Err(ConsistencyViolation::ConvertedAmountMismatch);
    }

    if !amounts.use_different_exchange_rate_for_income_tax_purposes && converted != taxable {
        return Err(ConsistencyViolation::SameRateAmountsMismatch);
    }

    verify_finalized(kind, amounts)
}

fn validate_input(
    amounts: &RecordAmounts,
    resolver: &DualAmountResolver,
    context: &NormalizationContext<'_>,
) -> Result<(), ConsistencyViolation> {
    if resolver.percent_on_business > FULL_PERCENT {
        return Err(ConsistencyViolation::PercentOnBusinessOutOfRange(
            resolver.percent_on_business,
        ));
    }

    if amounts.original_amount < 0 {
        return Err(ConsistencyViolation::NegativeOriginalAmount(
            amounts.original_amount,
        ));
    }

    if amounts.general_tax_id.is_some() {
        match context.general_tax_rate_in_bps {
            None => return Err(ConsistencyViolation::UnresolvedGeneralTax),
            Some(rate) if rate > FULL_BPS => {
                return Err(ConsistencyViolation::TaxRateOutOfRange(rate));
            }
            Some(_) => {}
        }
    }

    // A missing converted amount is filled in for default-currency records;
    // a conflicting one is a bug upstream.
    if resolver.in_default_currency
        && let Amount::Known(converted) = amounts.converted_amounts.original
        && converted != amounts.original_amount
    {
        return Err(ConsistencyViolation::ConvertedAmountMismatch);
    }

    // Foreign-currency same-rate records get their taxable pair overwritten
    // by the converted pair, so only default-currency ones can conflict.
    if resolver.in_default_currency
        && !amounts.use_different_exchange_rate_for_income_tax_purposes
        && let Amount::Known(taxable) = amounts.income_taxable_amounts.original
        && taxable != amounts.original_amount
    {
        return Err(ConsistencyViolation::SameRateAmountsMismatch);
    }

    Ok(())
}

fn verify_finalized(kind: RecordKind, amounts: &RecordAmounts) -> Result<(), ConsistencyViolation> {
    if amounts.status.is_finalized()
        && !(amounts.converted_amounts.is_resolved() && amounts.income_taxable_amounts.is_resolved())
    {
        return Err(ConsistencyViolation::FinalizedAmountsMissing(kind));
    }
    Ok(())
}
