//! Core data models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TransactionStatus;

/// Transaction information, as supplied by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Non-negative amount
    pub amount: Decimal,
    /// Transaction date (YYYY-MM-DD format)
    pub date: String,
    /// Client the invoice was issued to
    pub client_name: String,
    /// Invoice reference
    pub invoice_number: String,
    /// Approval status
    pub status: TransactionStatus,
}

impl Transaction {
    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Expense record submitted through the QR form.
///
/// Fields are private; a record is built by [`crate::draft::ExpenseDraft`]
/// or recovered from a payload, and never changes afterwards. Serde field
/// order is the payload field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    amount: Decimal,
    recipient: String,
    client_name: String,
    client_address: String,
    invoice_number: String,
}

impl ExpenseRecord {
    pub(crate) fn from_parts(
        amount: Decimal,
        recipient: String,
        client_name: String,
        client_address: String,
        invoice_number: String,
    ) -> Self {
        Self {
            amount,
            recipient,
            client_name,
            client_address,
            invoice_number,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn client_address(&self) -> &str {
        &self.client_address
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Text fields paired with their wire names, in payload order
    pub(crate) fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("recipient", &self.recipient),
            ("clientName", &self.client_name),
            ("clientAddress", &self.client_address),
            ("invoiceNumber", &self.invoice_number),
        ]
    }
}

/// Expense awaiting a manager's decision, shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub id: String,
    pub employee_name: String,
    pub amount: Decimal,
    /// Submission date (YYYY-MM-DD format)
    pub date: String,
    pub description: String,
}
