//! General tax back-calculation from tax-inclusive amounts.

use crate::amounts::{ResolvedAmounts, bps_base_part};

use super::status::FinancialRecordStatus;

/// Split of a tax-inclusive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    /// Amount without tax.
    pub tax_base: i64,
    /// Tax component.
    pub tax_amount: i64,
}

impl TaxBreakdown {
    /// Back-calculates base and tax from a tax-inclusive amount.
    #[must_use]
    pub fn from_tax_inclusive(tax_inclusive_amount: i64, rate_in_bps: u16) -> Self {
        let tax_base = bps_base_part(tax_inclusive_amount, rate_in_bps);
        Self {
            tax_base,
            tax_amount: tax_inclusive_amount - tax_base,
        }
    }
}

/// Outcome of applying the general tax to resolved amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTax {
    /// Amounts with tax-exclusive adjusted values where a tax applied.
    pub amounts: ResolvedAmounts,
    /// Rate to persist; `None` unless the tax was computed.
    pub general_tax_rate_in_bps: Option<u16>,
    /// Tax amount to persist; `None` unless the tax was computed.
    pub general_tax_amount: Option<i64>,
}

/// Applies the attached general tax, if any.
///
/// Tax is only computed for finalized records. The tax amount comes from the
/// income-taxable pair; each pair's adjusted amount becomes its own tax base,
/// so same-rate pairs stay identical.
#[must_use]
pub fn apply_general_tax(
    amounts: ResolvedAmounts,
    status: FinancialRecordStatus,
    rate_in_bps: Option<u16>,
) -> AppliedTax {
    let Some(rate) = rate_in_bps.filter(|_| status.is_finalized()) else {
        return AppliedTax {
            amounts,
            general_tax_rate_in_bps: None,
            general_tax_amount: None,
        };
    };

    let general_tax_amount = amounts
        .income_taxable
        .adjusted
        .known()
        .map(|tax_inclusive| TaxBreakdown::from_tax_inclusive(tax_inclusive, rate).tax_amount);

    let mut taxed = amounts;
    taxed.converted.adjusted = amounts
        .converted
        .adjusted
        .map(|tax_inclusive| TaxBreakdown::from_tax_inclusive(tax_inclusive, rate).tax_base);
    taxed.income_taxable.adjusted = amounts
        .income_taxable
        .adjusted
        .map(|tax_inclusive| TaxBreakdown::from_tax_inclusive(tax_inclusive, rate).tax_base);

    AppliedTax {
        amounts: taxed,
        general_tax_rate_in_bps: Some(rate),
        general_tax_amount,
    }
}
