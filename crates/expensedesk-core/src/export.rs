//! CSV export of the displayed transaction rows

use expensedesk_utils::fixed_amount;

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::types::SortKey;

/// Write `rows` as CSV, one line per transaction, columns in table order
pub fn export_csv(rows: &[&Transaction]) -> CoreResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(SortKey::COLUMNS.iter().map(|key| key.header()))
        .map_err(|e| CoreError::Export { message: e.to_string() })?;

    for tx in rows {
        writer
            .write_record([
                tx.date.as_str(),
                fixed_amount(tx.amount, 2).as_str(),
                tx.client_name.as_str(),
                tx.invoice_number.as_str(),
                tx.status.as_str(),
            ])
            .map_err(|e| CoreError::Export { message: e.to_string() })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Export { message: e.to_string() })?;
    String::from_utf8(bytes).map_err(|e| CoreError::Export { message: e.to_string() })
}
