//! Route modules for the API server
//!
//! - dashboard: Summary cards, pending approvals, quick actions
//! - transactions: Sortable table, search, CSV export, reload
//! - qr: Expense form and payload encode/decode
//!
//! Each module with pages follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX partial endpoints
//! - page.rs: Full page rendering

pub mod dashboard;
pub mod qr;
pub mod transactions;

use std::collections::HashMap;
use std::sync::Arc;

use expensedesk_config::TableConfig;
use expensedesk_core::table::default_directive;
use expensedesk_core::{
    CoreError, LoadState, SortDirection, SortDirective, SortKey, Transaction,
};

use crate::{ApiError, AppState};

/// Sort directive and search query selected by a request's query string
#[derive(Debug, Clone, PartialEq)]
pub struct ViewParams {
    pub sort: Option<SortDirective>,
    pub query: String,
}

impl ViewParams {
    /// Parse `sort`, `dir` and `q`.
    ///
    /// A missing `sort` falls back to the configured default; `sort=none`
    /// selects provider order.
    pub fn from_query(params: &HashMap<String, String>, table: &TableConfig) -> Result<Self, ApiError> {
        let sort = match params.get("sort").map(|s| s.trim()) {
            None | Some("") => default_directive(table),
            Some("none") => None,
            Some(raw) => {
                let key = raw
                    .parse::<SortKey>()
                    .map_err(|_| CoreError::InvalidSortKey { key: raw.to_string() })?;
                let direction = match params.get("dir").map(|d| d.trim()) {
                    None | Some("") => SortDirection::Ascending,
                    Some(dir) => dir.parse::<SortDirection>().map_err(ApiError::bad_request)?,
                };
                Some(SortDirective { key, direction })
            }
        };

        Ok(Self {
            sort,
            query: params.get("q").map(|q| q.trim().to_string()).unwrap_or_default(),
        })
    }

    /// Query string that reproduces this view with `sort` swapped in
    pub fn query_string(&self, sort: Option<SortDirective>) -> String {
        let mut qs = match sort {
            Some(directive) => format!(
                "sort={}&dir={}",
                directive.key.as_str(),
                directive.direction.as_str()
            ),
            None => "sort=none".to_string(),
        };
        if !self.query.is_empty() {
            qs.push_str("&q=");
            qs.push_str(&urlencoding::encode(&self.query));
        }
        qs
    }
}

/// Loaded records, fetching them first if nothing requested them yet.
///
/// A fetch started by someone else is not waited for.
pub(crate) async fn loaded_transactions(state: &AppState) -> Result<Arc<Vec<Transaction>>, ApiError> {
    if let Some(handle) = state.session.start().await {
        handle.await.map_err(|e| CoreError::InternalError { message: e.to_string() })?;
    }

    match state.session.snapshot().await.load {
        LoadState::Loaded(records) => Ok(records),
        LoadState::Failed(error) => Err(CoreError::Fetch(error).into()),
        LoadState::Idle | LoadState::Loading => Err(CoreError::NotLoaded.into()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::create_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use expensedesk_config::Config;
    use expensedesk_core::{ProviderRef, StaticProvider};
    use tower::ServiceExt;

    pub(crate) fn test_router(config: Config, provider: ProviderRef) -> Router {
        create_router(AppState::new(config, provider))
    }

    pub(crate) fn static_router() -> Router {
        test_router(Config::default(), Arc::new(StaticProvider))
    }

    /// Send one request and collect status and body text
    pub(crate) async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub(crate) async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        send(router, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_view_params_defaults_to_config() {
        let mut table = TableConfig::default();
        let view = ViewParams::from_query(&params(&[]), &table).unwrap();
        assert_eq!(view.sort, None);
        assert_eq!(view.query, "");

        table.default_sort = Some("date".to_string());
        let view = ViewParams::from_query(&params(&[]), &table).unwrap();
        assert_eq!(view.sort, Some(SortDirective::ascending(SortKey::Date)));

        let view = ViewParams::from_query(&params(&[("sort", "none")]), &table).unwrap();
        assert_eq!(view.sort, None);
    }

    #[test]
    fn test_view_params_parses_sort_and_query() {
        let table = TableConfig::default();
        let view = ViewParams::from_query(
            &params(&[("sort", "Client"), ("dir", "desc"), ("q", "  acme ")]),
            &table,
        )
        .unwrap();
        assert_eq!(view.sort, Some(SortDirective::descending(SortKey::ClientName)));
        assert_eq!(view.query, "acme");
    }

    #[test]
    fn test_view_params_rejects_unknown_column() {
        let table = TableConfig::default();
        let err = ViewParams::from_query(&params(&[("sort", "payee")]), &table).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ViewParams::from_query(&params(&[("sort", "amount"), ("dir", "up")]), &table)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_string() {
        let view = ViewParams { sort: None, query: "acme corp".to_string() };
        assert_eq!(
            view.query_string(Some(SortDirective::descending(SortKey::InvoiceNumber))),
            "sort=invoiceNumber&dir=desc&q=acme%20corp"
        );
        let view = ViewParams { sort: None, query: String::new() };
        assert_eq!(view.query_string(None), "sort=none");
    }
}
