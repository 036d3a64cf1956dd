//! Data providers
//!
//! The table and the dashboard only see these traits, so the sample data
//! can be swapped for a real backend without touching table logic.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FetchError;
use crate::models::{Approval, Transaction};
use crate::types::TransactionStatus;

/// Provider reference type
pub type ProviderRef = Arc<dyn TransactionProvider>;

/// Source of the full transaction history
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Fetch every transaction; no paging
    async fn fetch_all(&self) -> Result<Vec<Transaction>, FetchError>;

    /// Short name used in logs and error messages
    fn name(&self) -> &str;
}

/// Source of the pending approvals list
#[async_trait]
pub trait ApprovalProvider: Send + Sync {
    async fn fetch_approvals(&self) -> Result<Vec<Approval>, FetchError>;
}

/// Built-in sample data
#[derive(Debug, Clone, Default)]
pub struct StaticProvider;

fn sample_transaction(
    id: &str,
    cents: i64,
    date: &str,
    client_name: &str,
    invoice_number: &str,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: Decimal::new(cents, 2),
        date: date.to_string(),
        client_name: client_name.to_string(),
        invoice_number: invoice_number.to_string(),
        status,
    }
}

/// The five demo transactions
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        sample_transaction("1", 10050, "2024-03-15", "Acme Corp", "INV-001", TransactionStatus::Approved),
        sample_transaction("2", 7525, "2024-03-14", "TechStart Inc", "INV-002", TransactionStatus::Pending),
        sample_transaction("3", 20000, "2024-03-13", "Global Services Ltd", "INV-003", TransactionStatus::Rejected),
        sample_transaction("4", 15075, "2024-03-12", "Innovate Solutions", "INV-004", TransactionStatus::Approved),
        sample_transaction("5", 30000, "2024-03-11", "Digital Dynamics", "INV-005", TransactionStatus::Pending),
    ]
}

/// The three demo approvals
pub fn sample_approvals() -> Vec<Approval> {
    let approval = |id: &str, employee: &str, cents: i64, date: &str, description: &str| Approval {
        id: id.to_string(),
        employee_name: employee.to_string(),
        amount: Decimal::new(cents, 2),
        date: date.to_string(),
        description: description.to_string(),
    };
    vec![
        approval("1", "Alice Johnson", 15000, "2024-03-15", "Office supplies"),
        approval("2", "Bob Smith", 7550, "2024-03-14", "Client lunch"),
        approval("3", "Charlie Brown", 20000, "2024-03-13", "Travel expenses"),
    ]
}

#[async_trait]
impl TransactionProvider for StaticProvider {
    async fn fetch_all(&self) -> Result<Vec<Transaction>, FetchError> {
        Ok(sample_transactions())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[async_trait]
impl ApprovalProvider for StaticProvider {
    async fn fetch_approvals(&self) -> Result<Vec<Approval>, FetchError> {
        Ok(sample_approvals())
    }
}

/// Reads a JSON array of transactions from disk on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
    label: String,
}

impl JsonFileProvider {
    pub fn new(path: PathBuf) -> Self {
        let label = path.to_string_lossy().to_string();
        Self { path, label }
    }

    /// Reject records the table cannot show faithfully
    fn check(records: &[Transaction], source: &str) -> Result<(), FetchError> {
        let mut seen = HashSet::new();
        for tx in records {
            if !seen.insert(tx.id.as_str()) {
                return Err(FetchError::new(source, format!("duplicate transaction id '{}'", tx.id)));
            }
            if tx.amount.is_sign_negative() && !tx.amount.is_zero() {
                return Err(FetchError::new(source, format!("transaction '{}' has a negative amount", tx.id)));
            }
            if tx.date_naive().is_none() {
                return Err(FetchError::new(
                    source,
                    format!("transaction '{}' has date '{}', expected YYYY-MM-DD", tx.id, tx.date),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionProvider for JsonFileProvider {
    async fn fetch_all(&self) -> Result<Vec<Transaction>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::new(&self.label, e.to_string()))?;

        let records: Vec<Transaction> = serde_json::from_str(&content)
            .map_err(|e| FetchError::new(&self.label, format!("invalid JSON: {}", e)))?;

        Self::check(&records, &self.label)?;
        log::info!("Loaded {} transactions from {}", records.len(), self.label);
        Ok(records)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Pick the provider the configuration asks for
pub fn provider_from_config(config: &expensedesk_config::DataConfig) -> ProviderRef {
    match &config.transactions_file {
        Some(path) => Arc::new(JsonFileProvider::new(path.clone())),
        None => Arc::new(StaticProvider),
    }
}
