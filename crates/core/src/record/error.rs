//! Record error types.
//!
//! `ConsistencyViolation` is raised by normalization itself and always means
//! a caller or integration bug. `RecordError` adds the failures of the save
//! path around it (tax lookup, persistence).

use thiserror::Error;
use uuid::Uuid;

use tally_shared::AppError;
use tally_shared::types::GeneralTaxId;

use super::types::RecordKind;

/// Internal consistency rules broken by a record handed to the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyViolation {
    /// Default-currency record whose converted amount differs from the original.
    #[error("converted amount does not match original for default currency")]
    ConvertedAmountMismatch,

    /// Same exchange rate, but the converted and taxable amounts differ.
    #[error("amounts do not match but same exchange rate is used")]
    SameRateAmountsMismatch,

    /// Finalized record without both adjusted amounts.
    #[error("amounts are not provided for finalized {0}")]
    FinalizedAmountsMissing(RecordKind),

    /// Adjusted amount present while its original is pending.
    #[error("adjusted amount is provided without original amount")]
    AdjustedWithoutOriginal,

    /// A tax is attached but its rate was not resolved.
    #[error("general tax rate is not resolved for attached tax")]
    UnresolvedGeneralTax,

    /// Percent on business outside 0..=100.
    #[error("percent on business must be between 0 and 100, got {0}")]
    PercentOnBusinessOutOfRange(u8),

    /// Tax rate outside 0..=10000 bps.
    #[error("general tax rate must be between 0 and 10000 bps, got {0}")]
    TaxRateOutOfRange(u16),

    /// Negative original amount.
    #[error("original amount cannot be negative, got {0}")]
    NegativeOriginalAmount(i64),

    /// Record saved into a workspace it does not belong to.
    #[error("record does not belong to the workspace")]
    WorkspaceMismatch,
}

impl ConsistencyViolation {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConvertedAmountMismatch => "CONVERTED_AMOUNT_MISMATCH",
            Self::SameRateAmountsMismatch => "SAME_RATE_AMOUNTS_MISMATCH",
            Self::FinalizedAmountsMissing(_) => "FINALIZED_AMOUNTS_MISSING",
            Self::AdjustedWithoutOriginal => "ADJUSTED_WITHOUT_ORIGINAL",
            Self::UnresolvedGeneralTax => "UNRESOLVED_GENERAL_TAX",
            Self::PercentOnBusinessOutOfRange(_) => "PERCENT_ON_BUSINESS_OUT_OF_RANGE",
            Self::TaxRateOutOfRange(_) => "TAX_RATE_OUT_OF_RANGE",
            Self::NegativeOriginalAmount(_) => "NEGATIVE_ORIGINAL_AMOUNT",
            Self::WorkspaceMismatch => "WORKSPACE_MISMATCH",
        }
    }
}

/// Errors that can occur while saving or loading financial records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record broke a consistency rule.
    #[error(transparent)]
    Consistency(#[from] ConsistencyViolation),

    /// The attached general tax does not exist in the workspace.
    #[error("General tax not found: {0}")]
    GeneralTaxNotFound(GeneralTaxId),

    /// Record not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of the missing record.
        kind: RecordKind,
        /// Record id.
        id: Uuid,
    },

    /// Version mismatch on save.
    #[error("Concurrent modification detected for {kind} {id}: expected version {expected}, got {actual}")]
    ConcurrentModification {
        /// Kind of the record.
        kind: RecordKind,
        /// Record id.
        id: Uuid,
        /// Version currently stored.
        expected: i64,
        /// Version carried by the rejected save.
        actual: i64,
    },

    /// Repository failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl RecordError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Consistency(violation) => violation.error_code(),
            Self::GeneralTaxNotFound(_) => "GENERAL_TAX_NOT_FOUND",
            Self::NotFound { .. } => "RECORD_NOT_FOUND",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Consistency violations are never user errors and map to 500.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::GeneralTaxNotFound(_) | Self::NotFound { .. } => 404,
            Self::ConcurrentModification { .. } => 409,
            Self::Consistency(_) | Self::Repository(_) => 500,
        }
    }

    /// Returns true if this error is retryable with fresh data.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        let message = err.to_string();
        match err {
            RecordError::Consistency(_) => Self::Consistency(message),
            RecordError::GeneralTaxNotFound(_) | RecordError::NotFound { .. } => {
                Self::NotFound(message)
            }
            RecordError::ConcurrentModification { .. } => Self::Conflict(message),
            RecordError::Repository(_) => Self::Storage(message),
        }
    }
}
