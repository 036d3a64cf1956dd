//! Dashboard routes - Summary cards, pending approvals, quick actions

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use expensedesk_core::{Approval, CoreError, DashboardSummary, TransactionStatus};
use expensedesk_utils::escape_html;

use super::loaded_transactions;
use crate::{ApiError, AppState};

async fn approvals(state: &AppState) -> Result<Vec<Approval>, ApiError> {
    state
        .approvals
        .fetch_approvals()
        .await
        .map_err(|e| ApiError::from(CoreError::Fetch(e)))
}

/// Dashboard summary (JSON API)
pub async fn api_summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    let transactions = loaded_transactions(&state).await?;
    let approvals = approvals(&state).await?;
    Ok(Json(DashboardSummary::compute(&transactions, &approvals)))
}

/// Pending approvals (JSON API)
pub async fn api_approvals(State(state): State<AppState>) -> Result<Json<Vec<Approval>>, ApiError> {
    Ok(Json(approvals(&state).await?))
}

fn summary_card(title: &str, value: &str, note: &str, accent: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-md p-6'>
            <h2 class='text-lg font-semibold text-gray-700 mb-4'>{}</h2>
            <p class='text-3xl font-bold text-gray-800 mb-2'>{}</p>
            <p class='text-sm {}'>{}</p>
        </div>"#,
        escape_html(title),
        escape_html(value),
        accent,
        escape_html(note)
    )
}

fn render_cards(state: &AppState, summary: &DashboardSummary) -> String {
    let mut cards = String::new();
    cards.push_str(&summary_card(
        "Total Expenses",
        &state.money(summary.total_amount),
        &format!("{} transactions", summary.transaction_count),
        "text-gray-500",
    ));
    cards.push_str(&summary_card(
        "Pending Approvals",
        &summary.pending_approvals.to_string(),
        &format!("{} awaiting review", state.money(summary.pending_approval_amount)),
        "text-blue-500",
    ));
    for status in [TransactionStatus::Approved, TransactionStatus::Pending] {
        if let Some(total) = summary.status(status) {
            cards.push_str(&summary_card(
                status.as_str(),
                &state.money(total.amount),
                &format!("{} transactions", total.count),
                if status == TransactionStatus::Approved { "text-green-500" } else { "text-yellow-600" },
            ));
        }
    }
    cards
}

fn render_approvals(state: &AppState, approvals: &[Approval]) -> String {
    if approvals.is_empty() {
        return "<p class='text-gray-500'>No pending approvals</p>".to_string();
    }

    let mut html = String::from("<div class='space-y-4'>");
    for approval in approvals {
        html.push_str(&format!(
            r#"<div class='flex items-center justify-between border-b border-gray-200 pb-4 last:border-b-0 last:pb-0'>
                <div>
                    <p class='font-medium text-gray-800'>{}</p>
                    <p class='text-sm text-gray-600'>{}</p>
                    <p class='text-xs text-gray-500'>{}</p>
                </div>
                <p class='font-bold text-gray-800'>{}</p>
            </div>"#,
            escape_html(&approval.employee_name),
            escape_html(&approval.description),
            escape_html(&approval.date),
            state.money(approval.amount)
        ));
    }
    html.push_str("</div>");
    html
}

fn quick_action(title: &str, description: &str, href: &str) -> String {
    format!(
        r#"<a href='{}' class='block bg-white rounded-xl shadow-md p-6 hover:shadow-lg hover:bg-indigo-50'>
            <h3 class='text-xl font-semibold text-gray-800 mb-2'>{}</h3>
            <p class='text-gray-600'>{}</p>
        </a>"#,
        href, title, description
    )
}

fn summary_unavailable(error: &ApiError) -> String {
    log::warn!("Dashboard summary unavailable: {}", error);
    format!(
        "<div class='bg-red-50 text-red-600 rounded-xl p-6'>Summary unavailable: {}</div>",
        escape_html(&error.to_string())
    )
}

/// Dashboard page
pub async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let approval_list = approvals(&state).await;
    let cards = match (loaded_transactions(&state).await, &approval_list) {
        (Ok(transactions), Ok(list)) => {
            render_cards(&state, &DashboardSummary::compute(&transactions, list))
        }
        (Err(e), _) => summary_unavailable(&e),
        (_, Err(e)) => summary_unavailable(e),
    };

    let approvals_html = match &approval_list {
        Ok(list) => render_approvals(&state, list),
        Err(e) => format!(
            "<p class='text-red-600'>Error loading approvals: {}</p>",
            escape_html(&e.to_string())
        ),
    };

    let inner_content = format!(
        r#"<div class='space-y-8'>
            <h1 class='text-4xl font-bold text-gray-800'>Dashboard</h1>
            <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6'>{}</div>
            <div class='grid grid-cols-1 lg:grid-cols-3 gap-8'>
                <div class='lg:col-span-2 bg-white rounded-xl shadow-md p-6'>
                    <h2 class='text-2xl font-semibold text-gray-800 mb-4'>Pending Approvals</h2>
                    {}
                </div>
                <div>
                    <h2 class='text-2xl font-semibold text-gray-800 mb-4'>Quick Actions</h2>
                    <div class='space-y-4'>{}{}</div>
                </div>
            </div>
        </div>"#,
        cards,
        approvals_html,
        quick_action("Generate QR Code", "Create a new QR code for expense reimbursement", "/qr"),
        quick_action("View Transactions", "Check your recent transaction history", "/transactions"),
    );

    Html(crate::page_response(&headers, "Dashboard", "/", &inner_content))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{get, static_router};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_api_summary() {
        let router = static_router();
        let (status, body) = get(&router, "/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["transactionCount"], 5);
        assert_eq!(json["pendingApprovals"], 3);
        assert_eq!(json["totalAmount"], "826.50");
    }

    #[tokio::test]
    async fn test_api_approvals() {
        let router = static_router();
        let (status, body) = get(&router, "/api/approvals").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["employeeName"], "Alice Johnson");
    }

    #[tokio::test]
    async fn test_index_page_renders_cards_and_approvals() {
        let router = static_router();
        let (status, body) = get(&router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("$826.50"));
        assert!(body.contains("Charlie Brown"));
        assert!(body.contains("href='/qr'"));
    }
}
