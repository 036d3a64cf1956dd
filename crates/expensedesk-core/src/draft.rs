//! Typed form input for expense records
//!
//! The QR form collects raw strings into an [`ExpenseDraft`]. Validation
//! either yields an [`ExpenseRecord`] or one message per failing field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::ExpenseRecord;

/// Form field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseField {
    Amount,
    Recipient,
    ClientName,
    ClientAddress,
    InvoiceNumber,
}

impl ExpenseField {
    /// Fields in form order
    pub const ALL: [ExpenseField; 5] = [
        ExpenseField::Amount,
        ExpenseField::Recipient,
        ExpenseField::ClientName,
        ExpenseField::ClientAddress,
        ExpenseField::InvoiceNumber,
    ];

    /// Input name / JSON key
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseField::Amount => "amount",
            ExpenseField::Recipient => "recipient",
            ExpenseField::ClientName => "clientName",
            ExpenseField::ClientAddress => "clientAddress",
            ExpenseField::InvoiceNumber => "invoiceNumber",
        }
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseField::Amount => "Amount",
            ExpenseField::Recipient => "Recipient",
            ExpenseField::ClientName => "Client Name",
            ExpenseField::ClientAddress => "Client Address",
            ExpenseField::InvoiceNumber => "Invoice Number",
        }
    }

    /// Message shown when the field is left empty
    pub fn required_message(&self) -> &'static str {
        match self {
            ExpenseField::Amount => "Amount is required",
            ExpenseField::Recipient => "Recipient is required",
            ExpenseField::ClientName => "Client name is required",
            ExpenseField::ClientAddress => "Client address is required",
            ExpenseField::InvoiceNumber => "Invoice number is required",
        }
    }
}

impl std::fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ExpenseField,
    pub message: String,
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// All failing fields of a draft, in form order
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a single field, if it failed
    pub fn message_for(&self, field: ExpenseField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Raw form values; any field may still be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseDraft {
    pub amount: Option<String>,
    pub recipient: Option<String>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub invoice_number: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn validate_amount(raw: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| "Amount must be a number".to_string())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err("Amount must be at least 0".to_string());
    }
    Ok(amount)
}

impl ExpenseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, value: impl Into<String>) -> Self {
        self.amount = Some(value.into());
        self
    }

    pub fn recipient(mut self, value: impl Into<String>) -> Self {
        self.recipient = Some(value.into());
        self
    }

    pub fn client_name(mut self, value: impl Into<String>) -> Self {
        self.client_name = Some(value.into());
        self
    }

    pub fn client_address(mut self, value: impl Into<String>) -> Self {
        self.client_address = Some(value.into());
        self
    }

    pub fn invoice_number(mut self, value: impl Into<String>) -> Self {
        self.invoice_number = Some(value.into());
        self
    }

    /// Raw value of a field, for re-rendering the form
    pub fn value(&self, field: ExpenseField) -> Option<&str> {
        match field {
            ExpenseField::Amount => self.amount.as_deref(),
            ExpenseField::Recipient => self.recipient.as_deref(),
            ExpenseField::ClientName => self.client_name.as_deref(),
            ExpenseField::ClientAddress => self.client_address.as_deref(),
            ExpenseField::InvoiceNumber => self.invoice_number.as_deref(),
        }
    }

    /// Check every field and build the record.
    ///
    /// Text values are trimmed. All failing fields are reported together.
    pub fn validate(&self) -> Result<ExpenseRecord, ValidationErrors> {
        let mut errors = Vec::new();

        let amount = match present(&self.amount) {
            None => {
                errors.push(FieldError {
                    field: ExpenseField::Amount,
                    message: ExpenseField::Amount.required_message().to_string(),
                });
                None
            }
            Some(raw) => match validate_amount(raw) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(FieldError { field: ExpenseField::Amount, message });
                    None
                }
            },
        };

        let mut text = |field: ExpenseField, value: &Option<String>| -> String {
            match present(value) {
                Some(v) => v.to_string(),
                None => {
                    errors.push(FieldError {
                        field,
                        message: field.required_message().to_string(),
                    });
                    String::new()
                }
            }
        };

        let recipient = text(ExpenseField::Recipient, &self.recipient);
        let client_name = text(ExpenseField::ClientName, &self.client_name);
        let client_address = text(ExpenseField::ClientAddress, &self.client_address);
        let invoice_number = text(ExpenseField::InvoiceNumber, &self.invoice_number);

        match amount {
            Some(amount) if errors.is_empty() => Ok(ExpenseRecord::from_parts(
                amount,
                recipient,
                client_name,
                client_address,
                invoice_number,
            )),
            _ => Err(ValidationErrors { errors }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ExpenseDraft {
        ExpenseDraft::new()
            .amount("150")
            .recipient("Jane")
            .client_name("Acme")
            .client_address("123 Main St")
            .invoice_number("INV-009")
    }

    #[test]
    fn test_complete_draft_validates() {
        let record = full().validate().unwrap();
        assert_eq!(record.amount(), Decimal::new(150, 0));
        assert_eq!(record.recipient(), "Jane");
        assert_eq!(record.client_address(), "123 Main St");
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = ExpenseDraft::new().validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        let fields: Vec<ExpenseField> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ExpenseField::ALL.to_vec());
        assert_eq!(errors.message_for(ExpenseField::ClientName), Some("Client name is required"));
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let errors = full().recipient("   ").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for(ExpenseField::Recipient), Some("Recipient is required"));
    }

    #[test]
    fn test_text_values_are_trimmed() {
        let record = full().client_name("  Acme  ").validate().unwrap();
        assert_eq!(record.client_name(), "Acme");
    }

    #[test]
    fn test_amount_bounds() {
        let errors = full().amount("-0.01").validate().unwrap_err();
        assert_eq!(errors.message_for(ExpenseField::Amount), Some("Amount must be at least 0"));

        let errors = full().amount("twelve").validate().unwrap_err();
        assert_eq!(errors.message_for(ExpenseField::Amount), Some("Amount must be a number"));

        let record = full().amount("0").validate().unwrap();
        assert!(record.amount().is_zero());

        let record = full().amount("1e2").validate().unwrap();
        assert_eq!(record.amount(), Decimal::new(100, 0));
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = full().amount("").invoice_number("").validate().unwrap_err();
        assert_eq!(errors.to_string(), "Amount is required; Invoice number is required");
    }

    #[test]
    fn test_draft_from_json_with_missing_keys() {
        let draft: ExpenseDraft = serde_json::from_str(r#"{"amount":"10","recipient":"Jane"}"#).unwrap();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.message_for(ExpenseField::Amount).is_none());
    }
}
