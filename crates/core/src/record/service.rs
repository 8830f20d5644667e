//! Record service: the save path for expenses and incomes.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::{ConsistencyViolation, RecordError};
use super::normalizer::{NormalizationContext, normalize, validate_persisted};
use super::repository::{GeneralTaxRepository, RecordRepository};
use super::types::{Expense, FinancialRecord, Income};
use crate::workspace::Workspace;

/// Service for saving and loading financial records of one kind.
pub struct RecordService<T, R, G> {
    records: Arc<R>,
    taxes: Arc<G>,
    _record: PhantomData<fn() -> T>,
}

/// Expense service.
pub type ExpenseService<R, G> = RecordService<Expense, R, G>;

/// Income service.
pub type IncomeService<R, G> = RecordService<Income, R, G>;

impl<T, R, G> RecordService<T, R, G>
where
    T: FinancialRecord,
    R: RecordRepository<T>,
    G: GeneralTaxRepository,
{
    /// Create a new record service.
    #[must_use]
    pub fn new(records: Arc<R>, taxes: Arc<G>) -> Self {
        Self {
            records,
            taxes,
            _record: PhantomData,
        }
    }

    /// Normalize and persist a record.
    ///
    /// The attached general tax is looked up in the workspace and its current
    /// rate is captured on the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record belongs to another workspace
    /// - The attached general tax does not exist
    /// - The record breaks a consistency rule
    /// - The repository rejects the write (stale version, missing record)
    pub async fn save(&self, workspace: &Workspace, record: T) -> Result<T, RecordError> {
        debug!(
            record_kind = %T::KIND,
            workspace_id = %workspace.id,
            record_id = ?record.key(),
            version = record.version(),
            "Saving record"
        );

        if record.workspace_id() != workspace.id {
            let violation = ConsistencyViolation::WorkspaceMismatch;
            error!(record_kind = %T::KIND, workspace_id = %workspace.id, error = %violation, "Rejected record");
            return Err(violation.into());
        }

        let general_tax_rate_in_bps = match record.amounts().general_tax_id {
            Some(tax_id) => {
                let tax = self
                    .taxes
                    .find_by_id(workspace.id, tax_id)
                    .await?
                    .ok_or(RecordError::GeneralTaxNotFound(tax_id))?;
                Some(tax.rate_in_bps)
            }
            None => None,
        };

        let context = NormalizationContext {
            default_currency: &workspace.default_currency,
            general_tax_rate_in_bps,
        };
        let normalized = normalize(record, &context).inspect_err(|violation| {
            error!(
                record_kind = %T::KIND,
                workspace_id = %workspace.id,
                code = violation.error_code(),
                error = %violation,
                "Record failed consistency check"
            );
        })?;

        let saved = self.records.save(normalized).await?;

        info!(
            record_kind = %T::KIND,
            workspace_id = %workspace.id,
            record_id = ?saved.key(),
            version = saved.version(),
            status = %saved.amounts().status,
            "Record saved"
        );

        Ok(saved)
    }

    /// Load a record and re-check its invariants.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist in the workspace, or a
    /// consistency violation if the stored record is corrupt.
    pub async fn find(&self, workspace: &Workspace, id: Uuid) -> Result<T, RecordError> {
        let record = self
            .records
            .find_by_id(workspace.id, id)
            .await?
            .ok_or(RecordError::NotFound { kind: T::KIND, id })?;

        validate_persisted(&record, &workspace.default_currency).inspect_err(|violation| {
            error!(record_kind = %T::KIND, record_id = %id, error = %violation, "Stored record is inconsistent");
        })?;

        Ok(record)
    }
}

impl<R, G> ExpenseService<R, G>
where
    R: RecordRepository<Expense>,
    G: GeneralTaxRepository,
{
    /// Normalize and persist an expense.
    ///
    /// # Errors
    ///
    /// See [`RecordService::save`].
    pub async fn save_expense(
        &self,
        workspace: &Workspace,
        expense: Expense,
    ) -> Result<Expense, RecordError> {
        self.save(workspace, expense).await
    }
}

impl<R, G> IncomeService<R, G>
where
    R: RecordRepository<Income>,
    G: GeneralTaxRepository,
{
    /// Normalize and persist an income.
    ///
    /// # Errors
    ///
    /// See [`RecordService::save`].
    pub async fn save_income(
        &self,
        workspace: &Workspace,
        income: Income,
    ) -> Result<Income, RecordError> {
        self.save(workspace, income).await
    }
}
