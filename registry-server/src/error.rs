//! # Error Handling and Response Types
//!
//! Error types of the registry server and their HTTP mapping.
//!
//! ## Key Types
//!
//! - [`AppError`]: every failure a request or startup step can produce
//! - [`ErrorCode`]: machine-readable classification, mapped to a status code
//! - [`ApiErrorResponse`]: standardized JSON error body
//! - [`AppResult<T>`]: `Result` alias over [`AppError`]
//!
//! ## Responses
//!
//! - Unknown package or version: **404** with the standardized body
//! - No acceptable representation: **406** with the protocol's echo body,
//!   `{"accept_type": "<raw Accept header value>"}`
//! - Store, I/O, serialization and template failures: **500** with the
//!   standardized body:
//!
//! ```json
//! {
//!   "error": "Human-readable error message",
//!   "code": "internal_error",
//!   "details": null,
//!   "timestamp": "2024-01-01T12:00:00+00:00"
//! }
//! ```

use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::StoreError;

/// Standardized error response structure
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,          // Human-readable error message
    pub code: String,           // Machine-readable error code
    pub details: Option<Value>, // Additional error details
    pub timestamp: String,      // RFC 3339 timestamp
}

/// Body of a 406 response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NotAcceptableBody {
    pub accept_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    NotFound,
    NotAcceptable,
    StoreError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not_found",
            ErrorCode::NotAcceptable => "not_acceptable",
            ErrorCode::StoreError => "store_error",
            ErrorCode::InternalError => "internal_error",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            ErrorCode::StoreError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity store error: {0}")]
    Store(#[from] StoreError),

    #[error("Template rendering error: {0}")]
    Template(#[from] askama::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("No acceptable representation for Accept: {accept_type:?}")]
    NotAcceptable { accept_type: String },
}

impl AppError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::NotAcceptable { .. } => ErrorCode::NotAcceptable,
            AppError::Store(_) => ErrorCode::StoreError,
            AppError::Io(_) | AppError::Json(_) | AppError::Template(_) => {
                ErrorCode::InternalError
            }
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            AppError::Store(e) => e
                .source()
                .map(|source| json!({"source": source.to_string()})),
            _ => None,
        }
    }

    pub fn to_error_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            error: self.to_string(),
            code: self.error_code().as_str().to_string(),
            details: self.details(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = code.http_status();

        match self {
            AppError::NotAcceptable { accept_type } => {
                tracing::info!(accept = %accept_type, "No acceptable representation");
                (status, axum::Json(NotAcceptableBody { accept_type })).into_response()
            }
            AppError::NotFound(ref what) => {
                tracing::debug!(resource = %what, "Resource not found");
                (status, axum::Json(self.to_error_response())).into_response()
            }
            _ => {
                tracing::error!(error = %self, code = code.as_str(), "Request failed");
                if let Some(details) = self.details() {
                    tracing::error!(details = %details, "Internal server error details");
                }
                (status, axum::Json(self.to_error_response())).into_response()
            }
        }
    }
}

/// Convenient result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
