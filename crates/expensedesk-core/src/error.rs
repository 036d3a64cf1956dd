//! Error types for expensedesk-core
//!
//! Every failure the console can show maps to a stable error code, a
//! severity and a serializable detail block with suggestions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::ValidationErrors;
use crate::encoder::EncodingError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transactions not fetched yet
    NotLoaded,
    /// Form fields failed validation
    ValidationError,
    /// Record could not be encoded or payload could not be decoded
    EncodingError,
    /// Provider failed to deliver transactions
    FetchError,
    /// Unknown sort column
    InvalidSortKey,
    /// CSV export failed
    ExportError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::EncodingError => write!(f, "ENCODING_ERROR"),
            ErrorCode::FetchError => write!(f, "FETCH_ERROR"),
            ErrorCode::InvalidSortKey => write!(f, "INVALID_SORT_KEY"),
            ErrorCode::ExportError => write!(f, "EXPORT_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Failure reported by a transaction or approval provider
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{source_name}: {message}")]
pub struct FetchError {
    /// Which provider failed
    pub source_name: String,
    /// What went wrong
    pub message: String,
}

impl FetchError {
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Main error type for expensedesk-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transactions not loaded")]
    NotLoaded,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid sort key: {key}")]
    InvalidSortKey { key: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::Encoding(_) => ErrorCode::EncodingError,
            CoreError::Fetch(_) => ErrorCode::FetchError,
            CoreError::InvalidSortKey { .. } => ErrorCode::InvalidSortKey,
            CoreError::Export { .. } => ErrorCode::ExportError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Info,
            CoreError::Validation(_) => ErrorSeverity::Info,
            CoreError::Encoding(_) => ErrorSeverity::Error,
            CoreError::Fetch(_) => ErrorSeverity::Error,
            CoreError::InvalidSortKey { .. } => ErrorSeverity::Warning,
            CoreError::Export { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Wait for the transaction history to finish loading.".to_string()
                );
            }
            CoreError::Validation(errors) => {
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|e| (e.field.to_string(), serde_json::Value::String(e.message.clone())))
                    .collect();
                details = details.with_detail(serde_json::json!({ "fields": fields }));
                details = details.with_suggestion(
                    "Fill in every required field; the amount must be a number of 0 or more.".to_string()
                );
            }
            CoreError::Encoding(err) => {
                details = details.with_detail(serde_json::json!({ "encoding_message": err.to_string() }));
                details = details.with_suggestion(
                    "Submit the record through the QR form so it is validated first.".to_string()
                );
            }
            CoreError::Fetch(err) => {
                details = details.with_detail(serde_json::json!({ "source": err.source_name }));
                details = details.with_suggestion(
                    "Check the configured transactions file and reload the page.".to_string()
                );
            }
            CoreError::InvalidSortKey { .. } => {
                details = details.with_suggestion(
                    "Sortable columns: date, amount, clientName, invoiceNumber, status.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::info!(
                target: "expensedesk::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "expensedesk::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "expensedesk::error",
                "ERROR [{}] {} - Operation: {}",
                error.code(),
                error.to_details(),
                context.operation
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "expensedesk::error",
            "WARNING: {} - Operation: {}",
            message,
            context.operation
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::ExpenseDraft;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(ErrorCode::EncodingError.to_string(), "ENCODING_ERROR");
        assert_eq!(ErrorCode::FetchError.to_string(), "FETCH_ERROR");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::InvalidSortKey).unwrap();
        assert_eq!(json, "\"INVALID_SORT_KEY\"");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::NotLoaded.severity(), ErrorSeverity::Info);
        assert_eq!(
            CoreError::Fetch(FetchError::new("static", "boom")).severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            CoreError::InternalError { message: "x".to_string() }.severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_validation_details_list_fields() {
        let errors = ExpenseDraft::new().validate().unwrap_err();
        let error = CoreError::from(errors);
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::ValidationError);
        let fields = &details.details.as_ref().unwrap()["fields"];
        assert_eq!(fields["amount"], "Amount is required");
        assert_eq!(fields["invoiceNumber"], "Invoice number is required");
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_fetch_error_display() {
        let error = CoreError::from(FetchError::new("transactions.json", "file missing"));
        assert_eq!(error.to_string(), "Fetch error: transactions.json: file missing");
        assert_eq!(error.code(), ErrorCode::FetchError);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("export_csv");
        assert_eq!(context.operation, "export_csv");
    }
}
