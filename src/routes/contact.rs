use askama::Template;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use kursor_contact::{Employees, Submission, SubmissionInput};
use kursor_notification::{TransportConfig, contact::notification};
use serde::Serialize;
use strum::VariantArray;

use crate::{
    error::{ContactError, Rejection},
    routes::AppState,
};

#[derive(askama::Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub employees: &'static [Employees],
}

pub async fn page() -> Response {
    let template = ContactTemplate {
        employees: Employees::VARIANTS,
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render contact page: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Accepted {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// POST /api/contact
///
/// The body is read as raw bytes so that any content type is accepted.
/// Bodies that cannot be buffered, including those over the size limit,
/// get the same JSON error as unparsable ones.
pub async fn action(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Accepted>, Rejection> {
    let result = match body {
        Ok(body) => submit(&app_state, &body).await,
        Err(rejection) => Err(ContactError::UnreadableBody(rejection)),
    };

    result.map(Json).map_err(|error| Rejection {
        error,
        environment: app_state.config.environment,
    })
}

#[tracing::instrument(skip_all, fields(preview = app_state.config.preview_enabled()))]
async fn submit(app_state: &AppState, body: &[u8]) -> Result<Accepted, ContactError> {
    let body = serde_json::from_slice::<serde_json::Value>(body).map_err(ContactError::InvalidBody)?;

    let submission = Submission::try_from(SubmissionInput::from_json(&body))
        .map_err(|_| ContactError::MissingFields)?;

    let transport = select_transport(app_state).await?;

    let mailer = app_state
        .transports
        .connect(&transport)
        .map_err(ContactError::SendFailed)?;

    let config = &app_state.config;
    if !config.environment.is_production() && !transport.is_preview() && !config.email.skip_verify
    {
        mailer
            .verify()
            .await
            .map_err(ContactError::TransportVerifyFailed)?;
    }

    let email = notification(&submission, &config.email.from_name, &transport)
        .map_err(ContactError::SendFailed)?;

    let delivery = mailer.send(&email).await.map_err(ContactError::SendFailed)?;

    tracing::info!(reply_to = %submission.email, "Contact submission relayed");

    Ok(Accepted {
        success: true,
        preview_url: delivery.preview_url.filter(|_| transport.is_preview()),
    })
}

async fn select_transport(app_state: &AppState) -> Result<TransportConfig, ContactError> {
    if app_state.config.preview_enabled() {
        let account = app_state
            .transports
            .provision_preview()
            .await
            .map_err(ContactError::SendFailed)?;

        return Ok(TransportConfig::Preview(account));
    }

    app_state
        .config
        .email
        .smtp_settings()
        .map(TransportConfig::Production)
        .map_err(ContactError::ConfigMissing)
}
