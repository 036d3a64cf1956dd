//! Basic enumerations shared by the table and the encoder

use expensedesk_config::Direction;
use serde::{Deserialize, Serialize};

/// Approval status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Approved,
    Pending,
    Rejected,
}

impl TransactionStatus {
    /// All statuses in display order
    pub const ALL: [TransactionStatus; 3] = [
        TransactionStatus::Approved,
        TransactionStatus::Pending,
        TransactionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "Approved",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Rejected => "Rejected",
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approved" => Ok(TransactionStatus::Approved),
            "pending" => Ok(TransactionStatus::Pending),
            "rejected" => Ok(TransactionStatus::Rejected),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sortable transaction column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Date,
    Amount,
    ClientName,
    InvoiceNumber,
    Status,
}

impl SortKey {
    /// Columns in table display order
    pub const COLUMNS: [SortKey; 5] = [
        SortKey::Date,
        SortKey::Amount,
        SortKey::ClientName,
        SortKey::InvoiceNumber,
        SortKey::Status,
    ];

    /// Field name used in query strings and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
            SortKey::ClientName => "clientName",
            SortKey::InvoiceNumber => "invoiceNumber",
            SortKey::Status => "status",
        }
    }

    /// Column header label
    pub fn header(&self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Amount => "Amount",
            SortKey::ClientName => "Client",
            SortKey::InvoiceNumber => "Invoice",
            SortKey::Status => "Status",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;
    /// Accepts field names (`clientName`, `client_name`) and header labels (`Client`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match expensedesk_config::sort_column(s) {
            Some("date") => Ok(SortKey::Date),
            Some("amount") => Ok(SortKey::Amount),
            Some("clientName") => Ok(SortKey::ClientName),
            Some("invoiceNumber") => Ok(SortKey::InvoiceNumber),
            Some("status") => Ok(SortKey::Status),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Short form used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Ascending,
            Direction::Desc => SortDirection::Descending,
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Direction>().map(SortDirection::from)
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_accepts_headers_and_fields() {
        assert_eq!("Client".parse::<SortKey>(), Ok(SortKey::ClientName));
        assert_eq!("clientName".parse::<SortKey>(), Ok(SortKey::ClientName));
        assert_eq!("invoice_number".parse::<SortKey>(), Ok(SortKey::InvoiceNumber));
        assert_eq!("Invoice".parse::<SortKey>(), Ok(SortKey::InvoiceNumber));
        assert_eq!("AMOUNT".parse::<SortKey>(), Ok(SortKey::Amount));
        assert!("payee".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_round_trips_through_name() {
        for key in SortKey::COLUMNS {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
            assert_eq!(key.header().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_status_serde_uses_display_names() {
        let json = serde_json::to_string(&TransactionStatus::Pending).unwrap();
        assert_eq!(json, "\"Pending\"");
        let status: TransactionStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(status, TransactionStatus::Rejected);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert_eq!(SortDirection::from(Direction::Asc), SortDirection::Ascending);
    }
}
