//! API error mapping - converts crate errors into HTTP responses.
//!
//! Every failure leaving the API is a `{"message": ..., "detail": ...}`
//! JSON body with a conventional status code: 400 validation, 401
//! unauthorized, 404 not found, 409 conflict, 500 everything else. The
//! 500 message is generic; the underlying error display goes into
//! `detail` for diagnostics. The [`Json`] wrapper keeps body-parse
//! rejections in the same shape.

use crate::errors::Error;
use axum::{
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// `axum::Json` with its rejection mapped onto the crate's error body, so
/// a missing or malformed request body comes back as `{message, detail}`
/// like every other failure instead of axum's plain-text default.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// The `{message, detail}` body used for both errors and
/// success-with-message responses.
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    /// Short human-readable summary
    pub message: String,
    /// Supporting detail (validation specifics, counts, error displays)
    pub detail: String,
}

impl MessageBody {
    /// Builds a body from owned strings.
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// An HTTP-ready error: status code plus message body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: MessageBody,
}

impl ApiError {
    /// 404 with a consistent body for a missing entity.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: MessageBody::new(
                format!("{entity} not found"),
                format!("No {entity} with id '{id}'"),
            ),
        }
    }

    /// 401 with a consistent body for missing/invalid credentials.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            body: MessageBody::new("Unauthorized", detail),
        }
    }

    /// 400 with a validation message.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: MessageBody::new("Validation failed", detail),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, body) = match err {
            Error::Validation { message } => (
                StatusCode::BAD_REQUEST,
                MessageBody::new("Validation failed", message),
            ),
            Error::Conflict { message } => {
                (StatusCode::CONFLICT, MessageBody::new("Conflict", message))
            }
            Error::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                MessageBody::new("Unauthorized", message),
            ),
            Error::Token(e) => (
                StatusCode::UNAUTHORIZED,
                MessageBody::new("Unauthorized", format!("Invalid bearer token: {e}")),
            ),
            // Everything else is an unexpected server-side failure: generic
            // message, diagnostic detail.
            other => {
                error!(error = %other, "Unexpected server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageBody::new("Unexpected server error", other.to_string()),
                )
            }
        };
        Self { status, body }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            body: MessageBody::new("Malformed request body", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
