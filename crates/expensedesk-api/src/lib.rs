//! HTTP console server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Summary cards, pending approvals, quick actions
//! - routes::transactions: Sortable, searchable history and CSV export
//! - routes::qr: Expense form and payload encoding

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use expensedesk_config::Config;
use expensedesk_core::{ApprovalProvider, ProviderRef, SortCycle, StaticProvider, TableSession};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<TableSession>,
    pub approvals: Arc<dyn ApprovalProvider>,
    pub config: Config,
}

impl AppState {
    /// State wired from configuration; approvals always come from the sample set
    pub fn new(config: Config, provider: ProviderRef) -> Self {
        let session = TableSession::new(provider, SortCycle::from_config(&config.table), None);
        Self {
            session: Arc::new(session),
            approvals: Arc::new(StaticProvider),
            config,
        }
    }

    /// Format an amount with the configured currency settings
    pub fn money(&self, amount: Decimal) -> String {
        expensedesk_utils::format_amount(
            amount,
            &self.config.currency.symbol,
            self.config.currency.decimal_places,
        )
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_approvals, api_summary, index_page};
    use routes::qr::{api_qr_decode, api_qr_encode, page_qr, page_qr_submit};
    use routes::transactions::{
        api_reload, api_transactions, api_transactions_export, htmx_transactions_list,
        page_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/approvals", get(api_approvals))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/export", get(api_transactions_export))
        .route("/api/reload", post(api_reload))
        .route("/api/qr/encode", post(api_qr_encode))
        .route("/api/qr/decode", post(api_qr_decode))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/dashboard", get(index_page))
        .route("/transactions", get(page_transactions))
        .route("/qr", get(page_qr).post(page_qr_submit))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - ExpenseDesk</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        expensedesk_utils::escape_html(title),
        content
    )
}

/// Top navigation bar
pub fn nav_header(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard"),
        ("/qr", "Generate QR"),
        ("/transactions", "History"),
    ];

    let mut nav = String::from("<header class='bg-white shadow'><nav class='max-w-6xl mx-auto flex items-center gap-6 px-6 py-4'><a href='/' class='text-xl font-bold text-indigo-600'>ExpenseDesk</a><ul class='flex gap-4'>");

    for (path, label) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "text-indigo-600 font-semibold" } else { "text-gray-600 hover:text-indigo-600" };
        nav.push_str(&format!("<li><a href='{}' class='{}'>{}</a></li>", path, active_class, label));
    }
    nav.push_str("</ul></nav></header>");
    nav
}

/// Check if request is from HTMX
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='max-w-6xl mx-auto p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                "{}<main class='max-w-6xl mx-auto p-6'>{}</main>",
                nav_header(current_path),
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(config: Config, provider: ProviderRef) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, provider);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting ExpenseDesk server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /qr (Generate QR payload)");
    log::info!("  - /transactions (Transaction history)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
