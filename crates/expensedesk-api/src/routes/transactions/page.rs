//! Transactions page rendering

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use expensedesk_utils::escape_html;

use crate::routes::ViewParams;
use crate::AppState;

/// Transactions page - search box plus a container that loads the table
pub async fn page_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let list_url = match ViewParams::from_query(&params, &state.config.table) {
        Ok(view) => format!("/transactions/list?{}", view.query_string(view.sort)),
        Err(e) => {
            log::warn!("Ignoring bad table parameters: {}", e);
            "/transactions/list".to_string()
        }
    };
    let query = params.get("q").map(|q| q.as_str()).unwrap_or("");

    let inner_content = format!(
        r#"<div class='space-y-6'>
            <h1 class='text-3xl font-bold text-gray-800'>Transaction History</h1>
            <div class='flex flex-col sm:flex-row justify-between items-center gap-4'>
                <input type='search' name='q' value='{}' placeholder='Search transactions...'
                    hx-get='/transactions/list' hx-target='#transactions-content'
                    hx-trigger='keyup changed delay:300ms, search' hx-include='#table-sort'
                    class='px-4 py-2 w-full sm:w-64 border border-gray-300 rounded-lg'>
                <button onclick='reloadTransactions()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Reload</button>
            </div>
            <div id='transactions-content' hx-get='{}' hx-trigger='load' class='bg-white shadow-lg rounded-lg p-6'>
                <p class='text-center py-10'>Loading transactions...</p>
            </div>
        </div>
        <script>
        function reloadTransactions() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        htmx.trigger('#transactions-content', 'load');
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        escape_html(query),
        escape_html(&list_url)
    );

    Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{get, static_router};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_page_carries_view_params() {
        let router = static_router();
        let (status, body) = get(&router, "/transactions?sort=client&dir=desc&q=acme").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Transaction History"));
        assert!(body.contains("/transactions/list?sort=clientName&amp;dir=desc&amp;q=acme"));
        assert!(body.contains("value='acme'"));
    }

    #[tokio::test]
    async fn test_page_tolerates_bad_params() {
        let router = static_router();
        let (status, body) = get(&router, "/transactions?sort=payee").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("hx-get='/transactions/list'"));
    }
}
