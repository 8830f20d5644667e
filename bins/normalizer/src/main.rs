//! Tally normalizer
//!
//! Reads a JSON save request from the file named on the command line (or
//! stdin), normalizes the expense or income it carries, and prints the saved
//! record as JSON.

mod request;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::record::{
    ExpenseService, InMemoryGeneralTaxRepository, InMemoryRecordRepository, IncomeService,
};
use tally_shared::{AppConfig, AppError};

use request::{RecordRequest, SaveRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing; stdout is reserved for the saved record
    let json_logs = config.logging.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let input = read_input(std::env::args().nth(1))?;
    let request = SaveRequest::from_json(&input)?;
    let workspace = request.resolve_workspace(&config.workspace)?;

    let taxes = Arc::new(InMemoryGeneralTaxRepository::new());
    for tax in request.general_taxes {
        taxes.insert(tax);
    }

    info!(
        workspace_id = %workspace.id,
        default_currency = %workspace.default_currency,
        "Normalizing record"
    );

    let saved = match request.record {
        RecordRequest::Expense(expense) => {
            let service = ExpenseService::new(Arc::new(InMemoryRecordRepository::new()), taxes);
            service
                .save_expense(&workspace, expense)
                .await
                .map(RecordRequest::Expense)
        }
        RecordRequest::Income(income) => {
            let service = IncomeService::new(Arc::new(InMemoryRecordRepository::new()), taxes);
            service
                .save_income(&workspace, income)
                .await
                .map(RecordRequest::Income)
        }
    };

    let saved = saved.map_err(|e| {
        error!(error = %e, code = e.error_code(), "Failed to save record");
        AppError::from(e)
    })?;

    println!("{}", serde_json::to_string_pretty(&saved)?);

    Ok(())
}

fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}
