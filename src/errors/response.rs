use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::caught::ValidationErrors;
use super::kind::DEFAULT_MESSAGE;

/// The `errors` member: a fixed message, or per-field validation failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorPayload {
    Message(String),
    Fields(ValidationErrors),
}

impl Default for ErrorPayload {
    fn default() -> Self {
        Self::Message(DEFAULT_MESSAGE.to_string())
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// JSON error body returned to clients that accept JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Generic message, or field -> messages for validation failures
    pub errors: ErrorPayload,
    /// Same value as the HTTP status of the response
    pub status_code: u16,
    /// Message of the underlying error
    pub message: String,
    /// Error type name (debug mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    /// JSON-encoded stack trace (API debug mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl ErrorResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Body of the framework's default unauthenticated hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UnauthenticatedBody {
    pub error: String,
}

impl Default for UnauthenticatedBody {
    fn default() -> Self {
        Self {
            error: "Unauthenticated.".to_string(),
        }
    }
}

impl IntoResponse for UnauthenticatedBody {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}
