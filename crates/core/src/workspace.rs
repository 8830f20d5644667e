//! Workspace context consumed by normalization: home currency and taxes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_shared::config::WorkspaceConfig;
use tally_shared::types::{CurrencyCode, GeneralTaxId, WorkspaceId};
use tally_shared::{AppError, AppResult};

/// A workspace: the books of one person or business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace id.
    pub id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Home currency all amounts are converted to.
    pub default_currency: CurrencyCode,
}

impl Workspace {
    /// Builds a workspace from configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the default currency is malformed.
    pub fn from_config(id: WorkspaceId, config: &WorkspaceConfig) -> AppResult<Self> {
        let default_currency = config
            .default_currency
            .parse()
            .map_err(AppError::Configuration)?;
        Ok(Self {
            id,
            name: config.name.clone(),
            default_currency,
        })
    }
}

/// A general tax (VAT, GST, ...) that can be attached to records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralTax {
    /// Tax id.
    pub id: GeneralTaxId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub title: String,
    /// Rate in basis points, 0 to 10000.
    pub rate_in_bps: u16,
}

impl GeneralTax {
    /// Rate as a percentage with two decimals, e.g. `10.00`.
    #[must_use]
    pub fn rate_percent(&self) -> Decimal {
        Decimal::new(i64::from(self.rate_in_bps), 2)
    }
}
