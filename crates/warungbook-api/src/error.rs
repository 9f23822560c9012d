//! Error types for warungbook-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use warungbook_core::{CoreError, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.code() {
                ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::EntryNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// JSON body sent to the client
    pub fn body(&self) -> serde_json::Value {
        let error = match self {
            ApiError::NotFound { .. } => serde_json::json!({
                "code": "NOT_FOUND",
                "message": self.to_string(),
            }),
            ApiError::BadRequest { .. } => serde_json::json!({
                "code": "BAD_REQUEST",
                "message": self.to_string(),
            }),
            ApiError::Core(e) => serde_json::to_value(e.to_details()).unwrap_or_default(),
        };
        serde_json::json!({ "success": false, "error": error })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "warungbook::api", "{}", self);
        } else {
            log::debug!(target: "warungbook::api", "{} ({})", self, status);
        }
        (status, Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
