//! QR page rendering - Expense form with inline validation

use axum::http::HeaderMap;
use axum::response::Html;
use axum::Form;
use expensedesk_core::{encode, EncodedPayload, ExpenseDraft, ExpenseField, ValidationErrors};
use expensedesk_utils::escape_html;

fn input_type(field: ExpenseField) -> &'static str {
    match field {
        ExpenseField::Amount => "number",
        _ => "text",
    }
}

fn render_field(field: ExpenseField, draft: &ExpenseDraft, errors: Option<&ValidationErrors>) -> String {
    let error = errors.and_then(|e| e.message_for(field));
    let border = if error.is_some() { "border-red-500" } else { "border-gray-300" };
    let extra = match field {
        ExpenseField::Amount => " min='0' step='any'",
        _ => "",
    };
    let error_html = error
        .map(|message| format!("<p class='mt-1 text-sm text-red-600'>{}</p>", escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"<div>
            <label for='{name}' class='block text-sm font-medium text-gray-700 mb-1'>{}</label>
            <input id='{name}' name='{name}' type='{}' value='{}'{} class='block w-full px-3 py-2 border {} rounded-md'>
            {}
        </div>"#,
        field.label(),
        input_type(field),
        escape_html(draft.value(field).unwrap_or("")),
        extra,
        border,
        error_html,
        name = field.as_str()
    )
}

fn render_form(draft: &ExpenseDraft, errors: Option<&ValidationErrors>) -> String {
    let fields: String = ExpenseField::ALL
        .iter()
        .map(|&field| render_field(field, draft, errors))
        .collect();

    format!(
        r#"<form method='post' action='/qr' hx-post='/qr' hx-target='#qr-panel' hx-select='#qr-panel' hx-swap='outerHTML'
            class='grid grid-cols-1 md:grid-cols-2 gap-6'>
            {}
            <div class='md:col-span-2'>
                <button type='submit' class='w-full bg-indigo-600 text-white py-2 px-4 rounded-md hover:bg-indigo-700'>Generate QR Code</button>
            </div>
        </form>"#,
        fields
    )
}

fn render_payload(payload: &EncodedPayload) -> String {
    format!(
        r#"<div class='mt-8 flex flex-col items-center'>
            <h2 class='text-2xl font-semibold text-gray-800 mb-4'>Your QR Code</h2>
            <div id='qr-code' class='bg-white p-4 rounded-lg shadow-md' data-qr-payload='{}'></div>
            <pre class='mt-4 text-xs text-gray-600 whitespace-pre-wrap break-all'>{}</pre>
        </div>"#,
        escape_html(payload.as_str()),
        escape_html(payload.as_str())
    )
}

fn render_page(draft: &ExpenseDraft, errors: Option<&ValidationErrors>, result: &str) -> String {
    format!(
        r#"<div class='max-w-4xl mx-auto'>
            <h1 class='text-3xl font-bold text-gray-800 mb-8'>Generate QR Code</h1>
            <div id='qr-panel' class='bg-white rounded-xl shadow-lg p-8'>
                {}
                {}
            </div>
        </div>"#,
        render_form(draft, errors),
        result
    )
}

/// QR form page
pub async fn page_qr(headers: HeaderMap) -> Html<String> {
    let inner_content = render_page(&ExpenseDraft::new(), None, "");
    Html(crate::page_response(&headers, "Generate QR", "/qr", &inner_content))
}

/// Form submission: field errors re-render the form, a valid draft shows
/// its payload under the form
pub async fn page_qr_submit(headers: HeaderMap, Form(draft): Form<ExpenseDraft>) -> Html<String> {
    let inner_content = match draft.validate() {
        Err(errors) => {
            log::debug!("QR form rejected: {}", errors);
            render_page(&draft, Some(&errors), "")
        }
        Ok(record) => match encode(&record) {
            Ok(payload) => render_page(&draft, None, &render_payload(&payload)),
            Err(e) => {
                log::error!("Failed to encode validated record: {}", e);
                render_page(
                    &draft,
                    None,
                    &format!(
                        "<p class='mt-6 text-red-600'>Could not encode expense: {}</p>",
                        escape_html(&e.to_string())
                    ),
                )
            }
        },
    };

    Html(crate::page_response(&headers, "Generate QR", "/qr", &inner_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tests::{get, send, static_router};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    fn post_form(body: &str) -> Request<Body> {
        Request::post("/qr")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_page_qr_renders_empty_form() {
        let router = static_router();
        let (status, body) = get(&router, "/qr").await;
        assert_eq!(status, StatusCode::OK);
        for field in ExpenseField::ALL {
            assert!(body.contains(&format!("name='{}'", field.as_str())));
        }
        assert!(!body.contains("data-qr-payload"));
    }

    #[tokio::test]
    async fn test_submit_shows_all_missing_fields() {
        let router = static_router();
        let (status, body) = send(&router, post_form("amount=&recipient=Jane")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Amount is required"));
        assert!(body.contains("Client name is required"));
        assert!(body.contains("Client address is required"));
        assert!(body.contains("Invoice number is required"));
        assert!(!body.contains("Recipient is required"));
        assert!(body.contains("value='Jane'"));
        assert!(!body.contains("data-qr-payload"));
    }

    #[tokio::test]
    async fn test_submit_rejects_negative_amount() {
        let router = static_router();
        let (_, body) = send(
            &router,
            post_form("amount=-1&recipient=Jane&clientName=Acme&clientAddress=1+Road&invoiceNumber=INV-1"),
        )
        .await;
        assert!(body.contains("Amount must be at least 0"));
        assert!(!body.contains("data-qr-payload"));
    }

    #[tokio::test]
    async fn test_submit_valid_form_embeds_payload() {
        let router = static_router();
        let (_, body) = send(
            &router,
            post_form("amount=150&recipient=Jane&clientName=Acme&clientAddress=123+Main+St&invoiceNumber=INV-009"),
        )
        .await;
        assert!(body.contains("data-qr-payload='{&quot;amount&quot;:&quot;150&quot;,&quot;recipient&quot;:&quot;Jane&quot;"));
    }

    #[test]
    fn test_render_field_escapes_value() {
        let draft = ExpenseDraft::new().recipient("<b>Jane</b>");
        let html = render_field(ExpenseField::Recipient, &draft, None);
        assert!(html.contains("value='&lt;b&gt;Jane&lt;/b&gt;'"));
    }
}
