//! Lifecycle status of financial records.

use serde::{Deserialize, Serialize};

use crate::amounts::AmountsInDefaultCurrency;

/// Status derived from which amounts are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialRecordStatus {
    /// All amounts are known; tax has been computed.
    Finalized,
    /// The amount has not been converted to the default currency yet.
    #[default]
    PendingConversion,
    /// Converted for bookkeeping, but the tax exchange rate is still missing.
    PendingConversionForTaxationPurposes,
}

impl FinancialRecordStatus {
    /// Classifies resolved pairs.
    ///
    /// Pending conversion dominates: a record missing its basic conversion is
    /// never reported as merely pending for taxation.
    #[must_use]
    pub const fn classify(
        converted: &AmountsInDefaultCurrency,
        income_taxable: &AmountsInDefaultCurrency,
    ) -> Self {
        if !converted.original.is_known() {
            Self::PendingConversion
        } else if !income_taxable.original.is_known() {
            Self::PendingConversionForTaxationPurposes
        } else {
            Self::Finalized
        }
    }

    /// Returns true for finalized records.
    #[must_use]
    pub const fn is_finalized(self) -> bool {
        matches!(self, Self::Finalized)
    }
}

impl std::fmt::Display for FinancialRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finalized => write!(f, "FINALIZED"),
            Self::PendingConversion => write!(f, "PENDING_CONVERSION"),
            Self::PendingConversionForTaxationPurposes => {
                write!(f, "PENDING_CONVERSION_FOR_TAXATION_PURPOSES")
            }
        }
    }
}
