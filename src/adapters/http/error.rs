//! The error envelope every endpoint shares.
//!
//! Errors always serialize as `{message, issues?}`. Internal detail stays
//! in the server log; callers only ever see a stable message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::FieldIssue;

/// Wire shape for every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<FieldIssue>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            issues: None,
        }
    }

    pub fn with_issues(message: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        Self {
            message: message.into(),
            issues: Some(issues),
        }
    }
}

/// Builds an error response.
pub fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (status, Json(body)).into_response()
}

/// Builds the generic 500 after logging the real cause.
pub fn internal_error(detail: impl std::fmt::Display) -> Response {
    tracing::error!(error = %detail, "internal server error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("Internal server error"),
    )
}
