//! Financial records: expenses and incomes.
//!
//! This module implements the save path of a record:
//! - Validation of caller-supplied amounts against consistency rules
//! - Resolution of converted and income-taxable amounts
//! - Status classification and general tax back-calculation
//! - Persistence with optimistic locking

pub mod error;
pub mod normalizer;
pub mod repository;
pub mod service;
pub mod status;
pub mod tax;
pub mod types;

#[cfg(test)]
mod normalizer_props;

pub use error::{ConsistencyViolation, RecordError};
pub use normalizer::{
    NormalizationContext, normalize, normalize_amounts, validate_persisted,
    validate_persisted_amounts,
};
pub use repository::{
    GeneralTaxRepository, InMemoryGeneralTaxRepository, InMemoryRecordRepository,
    RecordRepository,
};
pub use service::{ExpenseService, IncomeService, RecordService};
pub use status::FinancialRecordStatus;
pub use tax::{AppliedTax, TaxBreakdown, apply_general_tax};
pub use types::{Expense, FinancialRecord, Income, RecordAmounts, RecordKind};
