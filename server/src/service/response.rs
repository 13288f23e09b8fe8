//! JSON envelope shared by every response, and the single translation point
//! from persistence errors to HTTP status codes.

use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog::FieldError;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::persistence::PersistenceError;

pub const MSG_NOT_FOUND: &str = "Juego no encontrado";
pub const MSG_INVALID_ID: &str = "ID de juego inválido";
pub const MSG_VALIDATION: &str = "Error de validación";
pub const MSG_DUPLICATE: &str = "El juego ya existe";
pub const MSG_INTERNAL: &str = "Error interno del servidor";
pub const MSG_ROUTE_NOT_FOUND: &str = "Ruta no encontrada";

/// `{success, data?, message?, error?, errors?, field?, path?}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T = Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ApiResponse<T> {
    fn empty(success: bool) -> Self {
        Self {
            success,
            data: None,
            message: None,
            error: None,
            errors: None,
            field: None,
            path: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(true)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// A success envelope carrying only a message.
    pub fn done(message: impl Into<String>) -> Self {
        Self::empty(true).with_message(message)
    }
}

/// A failed request: status plus the failure envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiResponse::empty(false).with_message(message),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    }

    pub fn route_not_found(path: &str) -> Self {
        let mut err = Self::new(StatusCode::NOT_FOUND, MSG_ROUTE_NOT_FOUND);
        err.body.path = Some(path.to_string());
        err
    }

    pub fn invalid_id(id: &str) -> Self {
        let mut err = Self::new(StatusCode::BAD_REQUEST, MSG_INVALID_ID);
        err.body.field = Some("id");
        err.body.error = Some(id.to_string());
        err
    }

    /// Single-field rejection that echoes the received body.
    pub fn field(field_error: FieldError, received: Value) -> Self {
        let mut err = Self::new(StatusCode::BAD_REQUEST, field_error.message);
        err.body.field = Some(field_error.field);
        err.body.data = Some(received);
        err
    }

    pub fn validation(messages: Vec<String>) -> Self {
        let mut err = Self::new(StatusCode::BAD_REQUEST, MSG_VALIDATION);
        err.body.errors = Some(messages);
        err
    }

    pub fn with_error(mut self, detail: impl Into<String>) -> Self {
        self.body.error = Some(detail.into());
        self
    }

    /// Classify a repository failure. Diagnostics for unclassified failures
    /// are only included when `dev_mode` is set.
    pub fn from_persistence(err: PersistenceError, dev_mode: bool) -> Self {
        match err {
            PersistenceError::Validation(messages) => {
                debug!(?messages, "Rejected by store validation");
                Self::validation(messages)
            }
            PersistenceError::Duplicate(detail) => {
                debug!(%detail, "Duplicate key");
                Self::new(StatusCode::BAD_REQUEST, MSG_DUPLICATE)
            }
            PersistenceError::InvalidId(id) => {
                debug!(%id, "Invalid game id");
                Self::invalid_id(&id)
            }
            other => {
                let detail = error_chain(&other);
                error!(error = %detail, "Unhandled persistence failure");
                let err = Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL);
                if dev_mode {
                    err.with_error(detail)
                } else {
                    err
                }
            }
        }
    }
}

fn error_chain(err: &PersistenceError) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
