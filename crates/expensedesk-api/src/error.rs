//! Error types for expensedesk-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use expensedesk_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use expensedesk_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error {
                CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CoreError::Encoding(_) | CoreError::InvalidSortKey { .. } => StatusCode::BAD_REQUEST,
                CoreError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::Fetch(_) => StatusCode::BAD_GATEWAY,
                CoreError::Export { .. } | CoreError::InternalError { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// JSON body: core errors carry their full detail block
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Core(error) => serde_json::to_value(error.to_details())
                .unwrap_or_else(|_| serde_json::json!({ "message": error.to_string() })),
            ApiError::BadRequest { message } => serde_json::json!({
                "code": "BAD_REQUEST",
                "message": message,
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core(error) => DefaultErrorLogger.log_error(error, &ErrorContext::new("api")),
            ApiError::BadRequest { message } => {
                DefaultErrorLogger.log_warning(message, &ErrorContext::new("api"))
            }
        }
        (self.status(), axum::Json(self.body())).into_response()
    }
}
