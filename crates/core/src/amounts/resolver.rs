//! Resolution of the converted and income-taxable amount pairs.
//!
//! Given what a caller supplied (possibly partial, possibly stale), the
//! resolver decides which amounts are known and recomputes every adjusted
//! amount from its original. Caller-supplied adjusted amounts are never
//! trusted.

use super::arithmetic::percent_part;
use super::types::{Amount, AmountsInDefaultCurrency};

/// Fully resolved amount pairs, ready for status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmounts {
    /// Bookkeeping view in the default currency.
    pub converted: AmountsInDefaultCurrency,
    /// Income tax view in the default currency.
    pub income_taxable: AmountsInDefaultCurrency,
}

/// Resolves the two amount pairs of a financial record.
#[derive(Debug, Clone, Copy)]
pub struct DualAmountResolver {
    /// Amount in the record currency, in minor units.
    pub original_amount: i64,
    /// Whether the record currency is the workspace default currency.
    pub in_default_currency: bool,
    /// Share of the amount attributable to the business, 0 to 100.
    pub percent_on_business: u8,
    /// Whether the income-taxable pair uses its own exchange rate.
    pub use_different_exchange_rate_for_income_tax_purposes: bool,
}

impl DualAmountResolver {
    /// Resolves both pairs.
    ///
    /// 1. Default-currency records take `original_amount` as converted original
    /// 2. A pair with a pending original becomes fully pending
    /// 3. Otherwise adjusted = `percent_on_business`% of original
    /// 4. Same-rate records copy the converted pair into the taxable pair
    #[must_use]
    pub fn resolve(
        &self,
        converted: &AmountsInDefaultCurrency,
        income_taxable: &AmountsInDefaultCurrency,
    ) -> ResolvedAmounts {
        let converted = self.resolve_pair(self.converted_original(converted));

        let income_taxable = if self.use_different_exchange_rate_for_income_tax_purposes {
            self.resolve_pair(income_taxable.original)
        } else {
            converted
        };

        ResolvedAmounts {
            converted,
            income_taxable,
        }
    }

    /// The converted original after the default-currency override.
    #[must_use]
    pub fn converted_original(&self, converted: &AmountsInDefaultCurrency) -> Amount {
        if self.in_default_currency {
            Amount::Known(self.original_amount)
        } else {
            converted.original
        }
    }

    fn resolve_pair(&self, original: Amount) -> AmountsInDefaultCurrency {
        match original {
            Amount::Pending => AmountsInDefaultCurrency::pending(),
            Amount::Known(original) => AmountsInDefaultCurrency::resolved(
                original,
                percent_part(original, self.percent_on_business),
            ),
        }
    }
}
