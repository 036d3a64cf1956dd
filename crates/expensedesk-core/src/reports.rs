//! Report structures for the dashboard and JSON API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Approval, Transaction};
use crate::table::SortDirective;
use crate::types::TransactionStatus;

/// Count and total for one status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTotal {
    pub status: TransactionStatus,
    pub count: usize,
    pub amount: Decimal,
}

/// Dashboard cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub transaction_count: usize,
    pub total_amount: Decimal,
    /// One entry per status, in display order, including empty ones
    pub by_status: Vec<StatusTotal>,
    pub pending_approvals: usize,
    pub pending_approval_amount: Decimal,
    pub latest_date: Option<String>,
}

impl DashboardSummary {
    pub fn compute(transactions: &[Transaction], approvals: &[Approval]) -> Self {
        let by_status = TransactionStatus::ALL
            .iter()
            .map(|&status| {
                let matching = transactions.iter().filter(|t| t.status == status);
                StatusTotal {
                    status,
                    count: matching.clone().count(),
                    amount: matching.map(|t| t.amount).sum(),
                }
            })
            .collect();

        Self {
            transaction_count: transactions.len(),
            total_amount: transactions.iter().map(|t| t.amount).sum(),
            by_status,
            pending_approvals: approvals.len(),
            pending_approval_amount: approvals.iter().map(|a| a.amount).sum(),
            latest_date: transactions.iter().map(|t| t.date.clone()).max(),
        }
    }

    pub fn status(&self, status: TransactionStatus) -> Option<&StatusTotal> {
        self.by_status.iter().find(|s| s.status == status)
    }
}

/// Transactions list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub sort: Option<SortDirective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}
