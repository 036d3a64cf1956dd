//! QR API endpoints
//!
//! Endpoints:
//! - api_qr_encode: Validate a draft and return its payload (JSON)
//! - api_qr_decode: Recover the record from a payload (JSON)

use axum::Json;
use expensedesk_core::{decode, encode, CoreError, EncodedPayload, ExpenseDraft, ExpenseRecord};
use serde::Serialize;

use crate::ApiError;

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub payload: EncodedPayload,
}

/// Validate and encode a draft
pub async fn api_qr_encode(Json(draft): Json<ExpenseDraft>) -> Result<Json<EncodeResponse>, ApiError> {
    let record = draft.validate().map_err(CoreError::from)?;
    let payload = encode(&record).map_err(CoreError::from)?;
    log::info!("Encoded payload for invoice {}", record.invoice_number());
    Ok(Json(EncodeResponse { payload }))
}

/// Decode a payload posted as the raw request body
pub async fn api_qr_decode(body: String) -> Result<Json<ExpenseRecord>, ApiError> {
    let payload = body.trim();
    if payload.is_empty() {
        return Err(ApiError::bad_request("payload is empty"));
    }
    Ok(Json(decode(payload).map_err(CoreError::from)?))
}

#[cfg(test)]
mod tests {
    use crate::routes::tests::{send, static_router};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_encode_valid_draft() {
        let router = static_router();
        let (status, body) = send(
            &router,
            post_json(
                "/api/qr/encode",
                r#"{"amount":"150.00","recipient":"Jane","clientName":"Acme","clientAddress":"123 Main St","invoiceNumber":"INV-009"}"#,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json["payload"],
            r#"{"amount":"150","recipient":"Jane","clientName":"Acme","clientAddress":"123 Main St","invoiceNumber":"INV-009"}"#
        );
    }

    #[tokio::test]
    async fn test_encode_reports_field_errors() {
        let router = static_router();
        let (status, body) = send(
            &router,
            post_json("/api/qr/encode", r#"{"amount":"-5","recipient":"Jane"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["details"]["fields"]["amount"], "Amount must be at least 0");
        assert_eq!(json["details"]["fields"]["clientName"], "Client name is required");
        assert!(json["details"]["fields"]["recipient"].is_null());
    }

    #[tokio::test]
    async fn test_decode_round_trip() {
        let router = static_router();
        let payload = r#"{"amount":"42.5","recipient":"Jane","clientName":"Acme","clientAddress":"1 Road","invoiceNumber":"INV-1"}"#;
        let (status, body) = send(
            &router,
            Request::post("/api/qr/decode").body(Body::from(payload)).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-1");
        assert_eq!(json["amount"], "42.5");
    }

    #[tokio::test]
    async fn test_decode_rejects_garbage() {
        let router = static_router();
        let (status, body) = send(
            &router,
            Request::post("/api/qr/decode").body(Body::from("not a payload")).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("ENCODING_ERROR"));

        let (status, _) = send(
            &router,
            Request::post("/api/qr/decode").body(Body::from("  ")).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
