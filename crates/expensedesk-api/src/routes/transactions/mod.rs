//! Transaction routes - Sortable history table, search, CSV export
//!
//! Structure:
//! - api.rs: JSON API, CSV export and the HTMX table fragment
//! - page.rs: Full page rendering

pub mod api;
pub mod page;

pub use api::{api_reload, api_transactions, api_transactions_export, htmx_transactions_list};
pub use page::page_transactions;
