//! Financial record types: expenses and incomes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_shared::types::{
    CategoryId, CurrencyCode, DocumentId, ExpenseId, GeneralTaxId, IncomeId, InvoiceId,
    WorkspaceId,
};

use super::status::FinancialRecordStatus;
use crate::amounts::{AmountsInDefaultCurrency, FULL_PERCENT};

/// Kind of financial record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
        }
    }
}

/// Monetary fields shared by expenses and incomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAmounts {
    /// Currency of the transaction.
    pub currency: CurrencyCode,
    /// Amount in `currency`, in minor units.
    pub original_amount: i64,
    /// Bookkeeping view in the default currency.
    #[serde(default)]
    pub converted_amounts: AmountsInDefaultCurrency,
    /// Tax view in the default currency.
    #[serde(default)]
    pub income_taxable_amounts: AmountsInDefaultCurrency,
    /// Whether the taxable view uses its own exchange rate.
    #[serde(default)]
    pub use_different_exchange_rate_for_income_tax_purposes: bool,
    /// Attached general tax.
    #[serde(default)]
    pub general_tax_id: Option<GeneralTaxId>,
    /// Rate of the attached tax at the time of the last save.
    #[serde(default)]
    pub general_tax_rate_in_bps: Option<u16>,
    /// Tax contained in the taxable amount.
    #[serde(default)]
    pub general_tax_amount: Option<i64>,
    /// Derived lifecycle status.
    #[serde(default)]
    pub status: FinancialRecordStatus,
}

impl RecordAmounts {
    /// Creates unconverted amounts without tax.
    #[must_use]
    pub fn new(currency: CurrencyCode, original_amount: i64) -> Self {
        Self {
            currency,
            original_amount,
            converted_amounts: AmountsInDefaultCurrency::pending(),
            income_taxable_amounts: AmountsInDefaultCurrency::pending(),
            use_different_exchange_rate_for_income_tax_purposes: false,
            general_tax_id: None,
            general_tax_rate_in_bps: None,
            general_tax_amount: None,
            status: FinancialRecordStatus::PendingConversion,
        }
    }
}

/// Capabilities the normalizer and repositories need from a record.
pub trait FinancialRecord: Clone + Send + Sync + 'static {
    /// Kind used in messages and logs.
    const KIND: RecordKind;

    /// Persistent key, `None` until first saved.
    fn key(&self) -> Option<Uuid>;

    /// Optimistic-locking version.
    fn version(&self) -> i64;

    /// Owning workspace.
    fn workspace_id(&self) -> WorkspaceId;

    /// When the record was first saved.
    fn time_recorded(&self) -> Option<DateTime<Utc>>;

    /// Share attributable to the business, 0 to 100.
    fn percent_on_business(&self) -> u8 {
        FULL_PERCENT
    }

    /// Monetary fields.
    fn amounts(&self) -> &RecordAmounts;

    /// Returns the record with its monetary fields replaced.
    #[must_use]
    fn with_amounts(self, amounts: RecordAmounts) -> Self;

    /// Returns the record with persistence metadata assigned.
    #[must_use]
    fn stamped(self, key: Uuid, version: i64, time_recorded: DateTime<Utc>) -> Self;
}

fn default_percent_on_business() -> u8 {
    FULL_PERCENT
}

/// An expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Expense id, assigned on first save.
    #[serde(default)]
    pub id: Option<ExpenseId>,
    /// Optimistic-locking version.
    #[serde(default)]
    pub version: i64,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Expense category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Short description.
    pub title: String,
    /// Date the expense was paid.
    pub date_paid: NaiveDate,
    /// When the expense was first saved.
    #[serde(default)]
    pub time_recorded: Option<DateTime<Utc>>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Attached documents.
    #[serde(default)]
    pub attachments: Vec<DocumentId>,
    /// Share attributable to the business, 0 to 100.
    #[serde(default = "default_percent_on_business")]
    pub percent_on_business: u8,
    /// Monetary fields.
    #[serde(flatten)]
    pub amounts: RecordAmounts,
}

impl FinancialRecord for Expense {
    const KIND: RecordKind = RecordKind::Expense;

    fn key(&self) -> Option<Uuid> {
        self.id.map(ExpenseId::into_inner)
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    fn time_recorded(&self) -> Option<DateTime<Utc>> {
        self.time_recorded
    }

    fn percent_on_business(&self) -> u8 {
        self.percent_on_business
    }

    fn amounts(&self) -> &RecordAmounts {
        &self.amounts
    }

    fn with_amounts(self, amounts: RecordAmounts) -> Self {
        Self { amounts, ..self }
    }

    fn stamped(self, key: Uuid, version: i64, time_recorded: DateTime<Utc>) -> Self {
        Self {
            id: Some(ExpenseId::from_uuid(key)),
            version,
            time_recorded: Some(time_recorded),
            ..self
        }
    }
}

/// An income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    /// Income id, assigned on first save.
    #[serde(default)]
    pub id: Option<IncomeId>,
    /// Optimistic-locking version.
    #[serde(default)]
    pub version: i64,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Income category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Short description.
    pub title: String,
    /// Date the income was received.
    pub date_received: NaiveDate,
    /// When the income was first saved.
    #[serde(default)]
    pub time_recorded: Option<DateTime<Utc>>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Attached documents.
    #[serde(default)]
    pub attachments: Vec<DocumentId>,
    /// Invoice this income pays, if any.
    #[serde(default)]
    pub linked_invoice_id: Option<InvoiceId>,
    /// Monetary fields.
    #[serde(flatten)]
    pub amounts: RecordAmounts,
}

impl FinancialRecord for Income {
    const KIND: RecordKind = RecordKind::Income;

    fn key(&self) -> Option<Uuid> {
        self.id.map(IncomeId::into_inner)
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    fn time_recorded(&self) -> Option<DateTime<Utc>> {
        self.time_recorded
    }

    fn amounts(&self) -> &RecordAmounts {
        &self.amounts
    }

    fn with_amounts(self, amounts: RecordAmounts) -> Self {
        Self { amounts, ..self }
    }

    fn stamped(self, key: Uuid, version: i64, time_recorded: DateTime<Utc>) -> Self {
        Self {
            id: Some(IncomeId::from_uuid(key)),
            version,
            time_recorded: Some(time_recorded),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amounts::Amount;

    fn usd() -> CurrencyCode {
        "USD".parse().unwrap()
    }

    #[test]
    fn test_income_is_fully_on_business() {
        let income = Income {
            id: None,
            version: 0,
            workspace_id: WorkspaceId::new(),
            category_id: None,
            title: "Consulting".to_string(),
            date_received: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time_recorded: None,
            notes: None,
            attachments: vec![],
            linked_invoice_id: None,
            amounts: RecordAmounts::new(usd(), 100),
        };
        assert_eq!(income.percent_on_business(), 100);
        assert_eq!(Income::KIND, RecordKind::Income);
    }

    #[test]
    fn test_expense_deserializes_flattened_amounts() {
        let json = serde_json::json!({
            "workspace_id": "018f0000-0000-7000-8000-000000000001",
            "title": "Office chair",
            "date_paid": "2026-02-14",
            "percent_on_business": 90,
            "currency": "usd",
            "original_amount": 450,
            "converted_amounts": {
                "original_amount_in_default_currency": null,
                "adjusted_amount_in_default_currency": 42,
            },
        });
        let expense: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(expense.amounts.currency, usd());
        assert_eq!(expense.amounts.converted_amounts.adjusted, Amount::Known(42));
        assert_eq!(expense.amounts.income_taxable_amounts, AmountsInDefaultCurrency::pending());
        assert_eq!(expense.amounts.status, FinancialRecordStatus::PendingConversion);
        assert_eq!(expense.percent_on_business, 90);
        assert_eq!(expense.version, 0);
        assert!(expense.id.is_none());
    }

    #[test]
    fn test_expense_percent_defaults_to_full() {
        let json = serde_json::json!({
            "workspace_id": "018f0000-0000-7000-8000-000000000001",
            "title": "Train ticket",
            "date_paid": "2026-02-14",
            "currency": "EUR",
            "original_amount": 1000,
        });
        let expense: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(expense.percent_on_business(), 100);
    }

    #[test]
    fn test_stamped_assigns_metadata() {
        let expense = Expense {
            id: None,
            version: 0,
            workspace_id: WorkspaceId::new(),
            category_id: None,
            title: "Lunch".to_string(),
            date_paid: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            time_recorded: None,
            notes: None,
            attachments: vec![],
            percent_on_business: 50,
            amounts: RecordAmounts::new(usd(), 20),
        };
        let key = Uuid::now_v7();
        let now = Utc::now();
        let stamped = expense.stamped(key, 3, now);
        assert_eq!(stamped.key(), Some(key));
        assert_eq!(stamped.version(), 3);
        assert_eq!(stamped.time_recorded(), Some(now));
        assert_eq!(stamped.percent_on_business(), 50);
    }
}
