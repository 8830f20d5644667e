//! JSON save requests accepted on the command line.

use serde::{Deserialize, Serialize};

use tally_core::record::{Expense, FinancialRecord, Income};
use tally_core::workspace::{GeneralTax, Workspace};
use tally_shared::config::WorkspaceConfig;
use tally_shared::types::WorkspaceId;
use tally_shared::{AppError, AppResult};

/// A record to save together with the workspace facts it needs.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    /// Workspace to save into; built from configuration when absent.
    #[serde(default)]
    pub workspace: Option<Workspace>,
    /// General taxes defined in the workspace.
    #[serde(default)]
    pub general_taxes: Vec<GeneralTax>,
    /// The record itself, keyed `expense` or `income`.
    #[serde(flatten)]
    pub record: RecordRequest,
}

/// Record payload of a save request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordRequest {
    /// Save an expense.
    Expense(Expense),
    /// Save an income.
    Income(Income),
}

impl RecordRequest {
    /// Workspace the record claims to belong to.
    pub fn workspace_id(&self) -> WorkspaceId {
        match self {
            Self::Expense(expense) => expense.workspace_id(),
            Self::Income(income) => income.workspace_id(),
        }
    }
}

impl SaveRequest {
    /// Parses a request from JSON text.
    pub fn from_json(input: &str) -> AppResult<Self> {
        serde_json::from_str(input).map_err(|e| AppError::Validation(e.to_string()))
    }

    /// The workspace carried by the request, or one built from configuration
    /// for the record's workspace id.
    pub fn resolve_workspace(&self, config: &WorkspaceConfig) -> AppResult<Workspace> {
        match &self.workspace {
            Some(workspace) => Ok(workspace.clone()),
            None => Workspace::from_config(self.record.workspace_id(), config),
        }
    }
}
