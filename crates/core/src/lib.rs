//! Core normalization logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Money is carried as integer minor units; all rounding happens in `amounts`.
//!
//! # Modules
//!
//! - `amounts` - Percent and basis-point arithmetic, dual amount resolution
//! - `record` - Expense and income normalization, status, general tax, save path
//! - `workspace` - Default currency and general tax definitions

pub mod amounts;
pub mod record;
pub mod workspace;

pub use record::{
    ConsistencyViolation, Expense, ExpenseService, FinancialRecord, FinancialRecordStatus, Income,
    IncomeService, RecordError,
};
pub use workspace::{GeneralTax, Workspace};
