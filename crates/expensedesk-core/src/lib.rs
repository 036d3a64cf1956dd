//! Expense records, payload encoding and the sortable transaction table
//!
//! - [`draft`] / [`encoder`]: QR form input, validation, canonical payloads
//! - [`table`] / [`state`] / [`session`]: sorting, the table state machine
//!   and the async fetch lifecycle
//! - [`provider`]: pluggable data sources
//! - [`reports`] / [`export`]: dashboard summary and CSV output

pub mod draft;
pub mod encoder;
pub mod error;
pub mod export;
pub mod models;
pub mod provider;
pub mod reports;
pub mod session;
pub mod state;
pub mod table;
pub mod types;

pub use draft::{ExpenseDraft, ExpenseField, FieldError, ValidationErrors};
pub use encoder::{decode, encode, EncodedPayload, EncodingError};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity, FetchError};
pub use export::export_csv;
pub use models::{Approval, ExpenseRecord, Transaction};
pub use provider::{
    provider_from_config, ApprovalProvider, JsonFileProvider, ProviderRef, StaticProvider,
    TransactionProvider,
};
pub use reports::{DashboardSummary, StatusTotal, TransactionsResponse};
pub use session::TableSession;
pub use state::{LoadState, TableEvent, TableState, TableView};
pub use table::{derive_view, filter_view, next_directive, SortCycle, SortDirective, SortableTable};
pub use types::{SortDirection, SortKey, TransactionStatus};
