//! HTTP error response mapping.
//!
//! Every failure is answered with the same envelope, a JSON array of
//! `{ "field"?: string, "message": string }` items. [`ApiError`] carries the
//! default status for its kind; handlers may move non-validation failures to
//! the status their route documents.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use postboard_domain::error::{NotFoundError, PostboardError, ValidationErrors};

/// Message returned in place of internal failure details.
pub const GENERIC_MESSAGE: &str = "Something was wrong";

/// One entry of the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
}

/// Error kinds, each with a default status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 400: the request body failed validation.
    Validation,
    /// 404: a referenced record does not exist.
    NotFound,
    /// 409: a write collided with a uniqueness constraint.
    Conflict,
    /// 500: persistence or other unexpected failure.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn default_status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps [`PostboardError`] to an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    status: StatusCode,
    items: Vec<ErrorItem>,
}

impl ApiError {
    fn new(kind: ErrorKind, items: Vec<ErrorItem>) -> Self {
        Self {
            kind,
            status: kind.default_status(),
            items,
        }
    }

    fn internal() -> Self {
        Self::new(
            ErrorKind::Internal,
            vec![ErrorItem {
                field: None,
                message: GENERIC_MESSAGE.to_string(),
            }],
        )
    }

    fn not_found(err: &NotFoundError) -> Self {
        Self::new(
            ErrorKind::NotFound,
            vec![ErrorItem {
                field: Some(err.field()),
                message: err.to_string(),
            }],
        )
    }

    /// Answer with `status` unless this is a validation failure, which
    /// always stays 400.
    #[must_use]
    pub fn with_failure_status(mut self, status: StatusCode) -> Self {
        if self.kind != ErrorKind::Validation {
            self.status = status;
        }
        self
    }

    /// Hide the failure behind the generic message and answer with `status`.
    /// Validation failures are left untouched.
    #[must_use]
    pub fn opaque(self, status: StatusCode) -> Self {
        if self.kind == ErrorKind::Validation {
            return self;
        }
        tracing::debug!(kind = ?self.kind, items = ?self.items, "masking failure details");
        Self::internal().with_failure_status(status)
    }

    /// Report any failure other than validation as a missing user (404,
    /// `User not found`).
    #[must_use]
    pub fn as_missing_user(self) -> Self {
        if self.kind == ErrorKind::Validation {
            return self;
        }
        tracing::debug!(kind = ?self.kind, items = ?self.items, "reporting failure as missing user");
        Self::not_found(&NotFoundError::User(String::new()))
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn items(&self) -> &[ErrorItem] {
        &self.items
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let items = errors
            .iter()
            .map(|err| ErrorItem {
                field: Some(err.field),
                message: err.message.to_string(),
            })
            .collect();
        Self::new(ErrorKind::Validation, items)
    }
}

impl From<PostboardError> for ApiError {
    fn from(err: PostboardError) -> Self {
        match err {
            PostboardError::Validation(errors) => errors.into(),
            PostboardError::NotFound(err) => {
                tracing::debug!(field = err.field(), id = err.id(), "record not found");
                Self::not_found(&err)
            }
            PostboardError::Conflict(err) => Self::new(
                ErrorKind::Conflict,
                vec![ErrorItem {
                    field: Some(err.field()),
                    message: err.to_string(),
                }],
            ),
            PostboardError::Storage(err) => {
                tracing::error!(error = %err, details = ?err, "storage error");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            ErrorKind::Validation,
            vec![ErrorItem {
                field: None,
                message: rejection.body_text(),
            }],
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, errors = ?self.items, "request failed");
        } else {
            tracing::warn!(status = %self.status, errors = ?self.items, "request failed");
        }
        (self.status, Json(self.items)).into_response()
    }
}
