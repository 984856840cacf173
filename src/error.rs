use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kursor_notification::{MissingConfig, TransportError};
use serde::Serialize;
use thiserror::Error;

use crate::config::Environment;

/// Every way a contact submission can fail. The display text is the stable
/// `error` message returned to callers.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Invalid JSON body")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Invalid JSON body")]
    UnreadableBody(#[source] BytesRejection),

    #[error("Missing fields: name, email, and message are required.")]
    MissingFields,

    #[error("Server email configuration is missing")]
    ConfigMissing(MissingConfig),

    #[error("Email transport verification failed")]
    TransportVerifyFailed(TransportError),

    #[error("Failed to send message")]
    SendFailed(TransportError),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::InvalidBody(_)
            | ContactError::UnreadableBody(_)
            | ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::ConfigMissing(_)
            | ContactError::TransportVerifyFailed(_)
            | ContactError::SendFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error; `diagnostics` adds configuration and
    /// transport internals.
    pub fn body(&self, diagnostics: bool) -> ErrorBody {
        let mut body = ErrorBody {
            error: self.to_string(),
            details: None,
            code: None,
            response: None,
            response_code: None,
        };

        if !diagnostics {
            return body;
        }

        match self {
            ContactError::InvalidBody(_)
            | ContactError::UnreadableBody(_)
            | ContactError::MissingFields => {}
            ContactError::ConfigMissing(missing) => body.details = Some(missing.to_string()),
            ContactError::TransportVerifyFailed(err) | ContactError::SendFailed(err) => {
                body.details = Some(err.message.clone());
                body.code = err.code.clone();
                body.response = err.response.clone();
                body.response_code = err.response_code;
            }
        }

        body
    }
}

/// A [`ContactError`] rendered for a given execution mode.
#[derive(Debug)]
pub struct Rejection {
    pub error: ContactError,
    pub environment: Environment,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = ?self.error, "contact submission failed");
        } else {
            tracing::debug!(error = %self.error, "contact submission rejected");
        }

        let body = self.error.body(!self.environment.is_production());

        (status_code, Json(body)).into_response()
    }
}
