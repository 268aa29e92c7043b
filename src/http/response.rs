//! Error → HTTP response mapping. The one place a status code is chosen.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;
use tokio::task::JoinError;

use crate::error::{AuthError, Error};

/// A failed request: status code plus a one-field JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    /// JSON key the message is reported under.
    pub field: &'static str,
    pub message: String,
}

impl ApiError {
    /// `{"status": "<message>"}` with the given code.
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            field: "status",
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Auth(AuthError::SignatureInvalid) => {
                Self::status(StatusCode::UNAUTHORIZED, message)
            }
            Error::Auth(AuthError::Decode(_)) => Self::status(StatusCode::FORBIDDEN, message),
            Error::Freshness(_) => Self::status(StatusCode::UNPROCESSABLE_ENTITY, message),
            Error::Sensor(_) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                field: "door_status",
                message,
            },
            Error::Actuator(_) | Error::AuditLog(_) | Error::Config(_) => {
                Self::status(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        error!("blocking task failed: {err}");
        Self::status(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field = self.field;
        (self.status, Json(json!({ field: self.message }))).into_response()
    }
}
