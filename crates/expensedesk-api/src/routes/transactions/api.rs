//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Sorted, filtered transaction list (JSON)
//! - api_transactions_export: Same view as CSV
//! - api_reload: Fetch transactions again
//! - htmx_transactions_list: Table fragment (HTML)

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;
use expensedesk_core::table::{derive_view, filter_view};
use expensedesk_core::{
    export_csv, next_directive, LoadState, SortDirection, SortKey, TableState, TableView,
    Transaction, TransactionStatus, TransactionsResponse,
};
use expensedesk_utils::escape_html;

use crate::routes::{loaded_transactions, ViewParams};
use crate::{ApiError, AppState};

/// Get the derived view (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let view = ViewParams::from_query(&params, &state.config.table)?;
    let records = loaded_transactions(&state).await?;

    let transactions: Vec<Transaction> = filter_view(derive_view(&records, view.sort), &view.query)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(TransactionsResponse {
        total_count: transactions.len(),
        transactions,
        sort: view.sort,
        query: (!view.query.is_empty()).then_some(view.query),
    }))
}

/// Download the derived view as CSV
pub async fn api_transactions_export(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let view = ViewParams::from_query(&params, &state.config.table)?;
    let records = loaded_transactions(&state).await?;
    let rows = filter_view(derive_view(&records, view.sort), &view.query);
    let csv = export_csv(&rows)?;

    log::info!("Exported {} transactions as CSV", rows.len());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"transactions.csv\""),
        ],
        csv,
    ))
}

/// Fetch transactions again and report the outcome
pub async fn api_reload(State(state): State<AppState>) -> Json<serde_json::Value> {
    let handle = state.session.reload().await;
    if let Err(e) = handle.await {
        log::error!("Reload task failed: {}", e);
        return Json(serde_json::json!({ "success": false, "message": e.to_string() }));
    }

    match state.session.snapshot().await.load {
        LoadState::Loaded(records) => Json(serde_json::json!({
            "success": true,
            "message": format!("Loaded {} transactions", records.len()),
        })),
        LoadState::Failed(error) => Json(serde_json::json!({
            "success": false,
            "message": error.to_string(),
        })),
        LoadState::Idle | LoadState::Loading => Json(serde_json::json!({
            "success": false,
            "message": "Reload superseded by another fetch",
        })),
    }
}

fn status_badge(status: TransactionStatus) -> String {
    let class = match status {
        TransactionStatus::Approved => "bg-green-100 text-green-800",
        TransactionStatus::Pending => "bg-yellow-100 text-yellow-800",
        TransactionStatus::Rejected => "bg-red-100 text-red-800",
    };
    format!(
        "<span class='px-2 inline-flex text-xs leading-5 font-semibold rounded-full {}'>{}</span>",
        class,
        status.as_str()
    )
}

fn render_header(state: &TableState, view: &ViewParams, key: SortKey) -> String {
    let next = next_directive(view.sort, key, state.cycle);
    let qs = view.query_string(next);
    let (indicator, aria) = match view.sort {
        Some(active) if active.key == key => match active.direction {
            SortDirection::Ascending => (" &#9650;", "ascending"),
            SortDirection::Descending => (" &#9660;", "descending"),
        },
        _ => ("", "none"),
    };
    format!(
        r#"<th aria-sort='{}' class='px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider cursor-pointer hover:bg-gray-100'>
            <a href='/transactions?{qs}' hx-get='/transactions/list?{qs}' hx-target='#transactions-content' hx-push-url='/transactions?{qs}' data-sort-key='{}'>{}{}</a>
        </th>"#,
        aria,
        key.as_str(),
        key.header(),
        indicator,
        qs = qs
    )
}

fn render_row(state: &AppState, tx: &Transaction) -> String {
    format!(
        r#"<tr class='hover:bg-gray-50'>
            <td class='px-6 py-4 whitespace-nowrap text-sm text-gray-500'>{}</td>
            <td class='px-6 py-4 whitespace-nowrap text-sm font-medium text-gray-900'>{}</td>
            <td class='px-6 py-4 whitespace-nowrap text-sm text-gray-500'>{}</td>
            <td class='px-6 py-4 whitespace-nowrap text-sm text-gray-500'>{}</td>
            <td class='px-6 py-4 whitespace-nowrap'>{}</td>
        </tr>"#,
        escape_html(&tx.date),
        state.money(tx.amount),
        escape_html(&tx.client_name),
        escape_html(&tx.invoice_number),
        status_badge(tx.status)
    )
}

/// Sort state carried along with the search box
fn render_sort_inputs(view: &ViewParams) -> String {
    let (sort, dir) = match view.sort {
        Some(directive) => (directive.key.as_str(), directive.direction.as_str()),
        None => ("none", ""),
    };
    format!(
        "<div id='table-sort'><input type='hidden' name='sort' value='{}'><input type='hidden' name='dir' value='{}'></div>",
        sort, dir
    )
}

/// Render the table body for a snapshot already narrowed to the request's view
pub(crate) fn render_table(app: &AppState, state: &TableState, view: &ViewParams) -> String {
    let pending_qs = view.query_string(view.sort);
    let rows = match state.filtered_view(&view.query) {
        TableView::Pending => {
            return format!(
                "<div class='text-center py-10' hx-get='/transactions/list?{}' hx-trigger='load delay:500ms' hx-target='#transactions-content'>Loading transactions...</div>",
                pending_qs
            );
        }
        TableView::Failed(error) => {
            return format!(
                "<div class='text-center py-10 text-red-600'>Error loading transactions<p class='text-sm text-gray-500 mt-2'>{}</p></div>",
                escape_html(&error.to_string())
            );
        }
        TableView::Ready(rows) => rows,
    };

    let mut html = render_sort_inputs(view);
    html.push_str(&format!(
        "<div class='flex justify-between items-center mb-4'><p class='text-sm text-gray-500'>{} transactions</p><a href='/api/transactions/export?{}' class='flex items-center bg-green-500 text-white px-4 py-2 rounded-lg hover:bg-green-600'>Export CSV</a></div>",
        rows.len(),
        pending_qs
    ));

    html.push_str("<div class='overflow-x-auto'><table class='min-w-full divide-y divide-gray-200'><thead class='bg-gray-50'><tr>");
    for key in SortKey::COLUMNS {
        html.push_str(&render_header(state, view, key));
    }
    html.push_str("</tr></thead><tbody class='bg-white divide-y divide-gray-200'>");

    if rows.is_empty() {
        let message = if view.query.is_empty() {
            "No transactions".to_string()
        } else {
            format!("No transactions match \"{}\"", escape_html(&view.query))
        };
        html.push_str(&format!(
            "<tr><td colspan='5' class='px-6 py-10 text-center text-gray-500'>{}</td></tr>",
            message
        ));
    }
    for tx in rows {
        html.push_str(&render_row(app, tx));
    }
    html.push_str("</tbody></table></div>");
    html
}

/// HTMX: Transaction table - Partial page update
///
/// Displaying the table starts the fetch; while it is in flight the
/// fragment polls itself.
pub async fn htmx_transactions_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let view = match ViewParams::from_query(&params, &state.config.table) {
        Ok(view) => view,
        Err(e) => {
            return Html(format!(
                "<div class='text-center py-10 text-red-600'>{}</div>",
                escape_html(&e.to_string())
            ));
        }
    };

    if state.session.start().await.is_some() {
        log::debug!("Transaction fetch started by table display");
    }

    let snapshot = TableState { sort: view.sort, ..state.session.snapshot().await };
    Html(render_table(&state, &snapshot, &view))
}
