//! Error types for warungbook-core
//!
//! Every failure the book can report carries an error code, a severity
//! and optional suggestions so the API layer can render it consistently.

use crate::types::EntrySource;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A draft failed validation
    ValidationError,
    /// No entry with the given id
    EntryNotFound,
    /// The entry store could not load or save
    StoreError,
    /// IO error
    IoError,
    /// Stored data could not be decoded
    InvalidFormat,
    /// A report export failed
    ExportError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::EntryNotFound => write!(f, "ENTRY_NOT_FOUND"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::ExportError => write!(f, "EXPORT_ERROR"),
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
    /// Offending field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            field: None,
            suggestions: vec![],
        }
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
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
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for warungbook-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{source_kind} entry not found: {id}")]
    EntryNotFound { source_kind: EntrySource, id: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Export error: {message}")]
    Export { message: String },
}

impl CoreError {
    /// Shorthand for a validation failure on one field
    pub fn validation(field: &str, message: &str) -> Self {
        CoreError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_found(source_kind: EntrySource, id: &str) -> Self {
        CoreError::EntryNotFound {
            source_kind,
            id: id.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::EntryNotFound { .. } => ErrorCode::EntryNotFound,
            CoreError::Store { .. } => ErrorCode::StoreError,
            CoreError::Io { .. } => ErrorCode::IoError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::Export { .. } => ErrorCode::ExportError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation { .. } => ErrorSeverity::Warning,
            CoreError::EntryNotFound { .. } => ErrorSeverity::Info,
            CoreError::Store { .. } => ErrorSeverity::Error,
            CoreError::Io { .. } => ErrorSeverity::Error,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Error,
            CoreError::Export { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Validation { field, .. } => {
                details = details.with_field(field);
                details = details.with_suggestion(format!(
                    "Fill in a valid value for '{}' and submit again.", field
                ));
            }
            CoreError::EntryNotFound { source_kind, .. } => {
                details = details.with_suggestion(format!(
                    "Reload the {} list; the entry may have been deleted.", source_kind
                ));
            }
            CoreError::Store { .. } | CoreError::Io { .. } => {
                details = details.with_suggestion(
                    "Check that the data directory exists and is writable.".to_string()
                );
                details = details.with_suggestion(
                    "The last saved entries are still in use.".to_string()
                );
            }
            CoreError::InvalidFormat { .. } => {
                details = details.with_suggestion(
                    "The entries file must be a JSON object with income, expenses and dishes lists.".to_string()
                );
            }
            CoreError::Export { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::InvalidFormat {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for CoreError {
    fn from(error: csv::Error) -> Self {
        CoreError::Export {
            message: error.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for CoreError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        CoreError::Export {
            message: error.to_string(),
        }
    }
}

/// Context attached to a logged error
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed, e.g. `create_income`
    pub operation: String,
    /// Entry id involved, if any
    pub entry_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            entry_id: None,
        }
    }

    pub fn with_entry_id(mut self, entry_id: &str) -> Self {
        self.entry_id = Some(entry_id.to_string());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Error logger writing through the `log` crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let line = format!(
            "[{}] {} - Operation: {} - Entry: {:?}",
            error.code(),
            error,
            context.operation,
            context.entry_id
        );
        match error.severity() {
            ErrorSeverity::Error => log::error!(target: "warungbook::error", "{}", line),
            ErrorSeverity::Warning => log::warn!(target: "warungbook::error", "{}", line),
            ErrorSeverity::Info => log::info!(target: "warungbook::error", "{}", line),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "warungbook::error",
            "WARNING: {} - Operation: {}",
            message,
            context.operation
        );
    }
}
