//! Error types for the server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::estimators::{ErrorKind, EstimatorError};

#[derive(Error, Debug)]
pub enum ServerError {
    /// The payload is not a structurally valid request
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::MalformedInput(rejection.body_text())
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Estimator(e) => match e.kind() {
                ErrorKind::Shape => StatusCode::BAD_REQUEST,
                ErrorKind::NotFitted => StatusCode::CONFLICT,
                ErrorKind::SingularSystem => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::InvalidParameter => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error kind reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::MalformedInput(_) => "malformed_input",
            ServerError::PayloadTooLarge(_) => "payload_too_large",
            ServerError::Estimator(e) => match e.kind() {
                ErrorKind::Shape => "shape_error",
                ErrorKind::NotFitted => "not_fitted",
                ErrorKind::SingularSystem => "singular_system",
                ErrorKind::InvalidParameter => "internal",
            },
            ServerError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let message = if status.is_server_error() {
            tracing::error!(kind, detail = %self, "Internal server error");
            "An internal error occurred".to_string()
        } else {
            tracing::warn!(kind, status = status.as_u16(), detail = %self, "Request rejected");
            match &self {
                ServerError::Estimator(e) => e.to_string(),
                ServerError::MalformedInput(msg) | ServerError::PayloadTooLarge(msg) => msg.clone(),
                ServerError::Internal(msg) => msg.clone(),
            }
        };

        let body = Json(json!({
            "error": true,
            "kind": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
