//! Expense payload encoding
//!
//! A payload is compact JSON with a fixed key order:
//!
//! ```text
//! {"amount":"150","recipient":"Jane","clientName":"Acme","clientAddress":"123 Main St","invoiceNumber":"INV-009"}
//! ```
//!
//! The amount is written as a normalized decimal string, so equal amounts
//! with different scales (`150`, `150.00`) produce the same bytes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ExpenseRecord;

/// Errors raised while encoding a record or decoding a payload
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("amount must not be negative (got {amount})")]
    NegativeAmount { amount: Decimal },

    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Opaque string handed to the QR renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for EncodedPayload {
    fn from(payload: String) -> Self {
        Self(payload)
    }
}

impl std::fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialization shape of a record; field order here is the wire order
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a> {
    amount: String,
    recipient: &'a str,
    client_name: &'a str,
    client_address: &'a str,
    invoice_number: &'a str,
}

fn check_record(record: &ExpenseRecord) -> Result<(), EncodingError> {
    if record.amount().is_sign_negative() && !record.amount().is_zero() {
        return Err(EncodingError::NegativeAmount { amount: record.amount() });
    }
    for (field, value) in record.text_fields() {
        if value.trim().is_empty() {
            return Err(EncodingError::EmptyField { field });
        }
    }
    Ok(())
}

/// Encode a record into its canonical payload.
///
/// Pure: the same logical record always produces the same string.
pub fn encode(record: &ExpenseRecord) -> Result<EncodedPayload, EncodingError> {
    check_record(record)?;

    let wire = Wire {
        amount: record.amount().normalize().to_string(),
        recipient: record.recipient(),
        client_name: record.client_name(),
        client_address: record.client_address(),
        invoice_number: record.invoice_number(),
    };
    let payload = serde_json::to_string(&wire)?;
    log::debug!("Encoded expense payload for invoice {} ({} bytes)", record.invoice_number(), payload.len());
    Ok(EncodedPayload(payload))
}

/// Recover a record from a payload produced by [`encode`]
pub fn decode(payload: &str) -> Result<ExpenseRecord, EncodingError> {
    let record: ExpenseRecord = serde_json::from_str(payload)?;
    check_record(&record)?;
    Ok(record)
}
