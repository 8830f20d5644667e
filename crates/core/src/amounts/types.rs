//! Tri-state amounts and amount pairs in the workspace default currency.

use serde::{Deserialize, Serialize};

/// An amount in minor units that may not be known yet.
///
/// Serialized as a nullable integer: `null` is [`Amount::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Amount {
    /// Not yet converted or not yet computable.
    #[default]
    Pending,
    /// Known amount in minor units.
    Known(i64),
}

impl Amount {
    /// Returns the value if known.
    #[must_use]
    pub const fn known(self) -> Option<i64> {
        match self {
            Self::Pending => None,
            Self::Known(value) => Some(value),
        }
    }

    /// Returns true if the amount is known.
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Applies `f` to a known value, leaving `Pending` untouched.
    #[must_use]
    pub fn map(self, f: impl FnOnce(i64) -> i64) -> Self {
        match self {
            Self::Pending => Self::Pending,
            Self::Known(value) => Self::Known(f(value)),
        }
    }
}

impl From<Option<i64>> for Amount {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Pending, Self::Known)
    }
}

impl From<Amount> for Option<i64> {
    fn from(amount: Amount) -> Self {
        amount.known()
    }
}

/// Original and adjusted amounts in the workspace default currency.
///
/// `original` is the amount converted at the booking (or tax) exchange rate.
/// `adjusted` is the same amount after percent-on-business apportionment and,
/// for finalized records with an attached tax, without the tax component.
///
/// A normalized pair never has a known `adjusted` with a pending `original`;
/// pairs supplied by callers may, and are repaired by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountsInDefaultCurrency {
    /// Converted amount before adjustments.
    #[serde(rename = "original_amount_in_default_currency", default)]
    pub original: Amount,
    /// Converted amount after adjustments.
    #[serde(rename = "adjusted_amount_in_default_currency", default)]
    pub adjusted: Amount,
}

impl AmountsInDefaultCurrency {
    /// A pair waiting for conversion.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            original: Amount::Pending,
            adjusted: Amount::Pending,
        }
    }

    /// A fully resolved pair.
    #[must_use]
    pub const fn resolved(original: i64, adjusted: i64) -> Self {
        Self {
            original: Amount::Known(original),
            adjusted: Amount::Known(adjusted),
        }
    }

    /// A pair as supplied by a caller, possibly inconsistent.
    #[must_use]
    pub fn from_options(original: Option<i64>, adjusted: Option<i64>) -> Self {
        Self {
            original: original.into(),
            adjusted: adjusted.into(),
        }
    }

    /// Returns true if both amounts are known.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.original.is_known() && self.adjusted.is_known()
    }

    /// Returns true unless `adjusted` is known without an `original`.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.original.is_known() || !self.adjusted.is_known()
    }
}
