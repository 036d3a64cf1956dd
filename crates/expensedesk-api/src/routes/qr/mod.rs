//! QR routes - Expense form, payload encoding and decoding
//!
//! Structure:
//! - api.rs: JSON encode/decode endpoints
//! - page.rs: Form page and form submission

pub mod api;
pub mod page;

pub use api::{api_qr_decode, api_qr_encode};
pub use page::{page_qr, page_qr_submit};
