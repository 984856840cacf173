//! Fake mail transports and app setup shared by the integration tests

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use kursor::{
    AppState,
    config::{Config, Environment, ObservabilityConfig, ServerConfig},
};
use kursor_contact::{FormDraft, Submitter};
use kursor_notification::{
    Delivery, EmailConfig, Mailer, OutgoingEmail, PreviewAccount, PreviewConfig, SmtpMailer,
    TransportConfig, TransportError, Transports, preview_url,
};
use tower::ServiceExt;

pub const RELAY_REPLY: &str = "250 Accepted [STATUS=new MSGID=Zm9vYmFy]";

/// Records everything the handler asks of the mail layer.
#[derive(Default)]
pub struct FakeTransports {
    provision_error: Option<TransportError>,
    verify_error: Option<TransportError>,
    send_error: Option<TransportError>,
    provisioned: AtomicUsize,
    connected: Mutex<Vec<TransportConfig>>,
    verified: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl FakeTransports {
    pub fn failing_provision(err: TransportError) -> Self {
        Self {
            provision_error: Some(err),
            ..Default::default()
        }
    }

    pub fn failing_verify(err: TransportError) -> Self {
        Self {
            verify_error: Some(err),
            ..Default::default()
        }
    }

    pub fn failing_send(err: TransportError) -> Self {
        Self {
            send_error: Some(err),
            ..Default::default()
        }
    }

    pub fn provisioned(&self) -> usize {
        self.provisioned.load(Ordering::SeqCst)
    }

    pub fn connected(&self) -> Vec<TransportConfig> {
        self.connected.lock().unwrap().clone()
    }

    pub fn verified(&self) -> usize {
        self.verified.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transports for FakeTransports {
    async fn provision_preview(&self) -> Result<PreviewAccount, TransportError> {
        self.provisioned.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.provision_error {
            return Err(err.clone());
        }

        Ok(PreviewAccount {
            user: "preview.user@ethereal.email".to_owned(),
            password: "preview-secret".to_owned(),
            relay_host: "smtp.ethereal.email".to_owned(),
            relay_port: 587,
            web_url: "https://ethereal.email".to_owned(),
        })
    }

    fn connect(&self, config: &TransportConfig) -> Result<Box<dyn Mailer>, TransportError> {
        self.connected.lock().unwrap().push(config.clone());

        let web_url = match config {
            TransportConfig::Preview(account) => Some(account.web_url.clone()),
            TransportConfig::Production(_) => None,
        };

        Ok(Box::new(FakeMailer {
            web_url,
            verify_error: self.verify_error.clone(),
            send_error: self.send_error.clone(),
            verified: self.verified.clone(),
            sent: self.sent.clone(),
        }))
    }
}

struct FakeMailer {
    web_url: Option<String>,
    verify_error: Option<TransportError>,
    send_error: Option<TransportError>,
    verified: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn verify(&self) -> Result<(), TransportError> {
        self.verified.fetch_add(1, Ordering::SeqCst);

        match &self.verify_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, TransportError> {
        if let Some(err) = &self.send_error {
            return Err(err.clone());
        }

        // Same envelope checks as the real relay path
        SmtpMailer::message(email)?;

        self.sent.lock().unwrap().push(email.clone());

        let response = vec![RELAY_REPLY.to_owned()];
        let preview_url = self
            .web_url
            .as_deref()
            .and_then(|web_url| preview_url(web_url, response.iter().map(String::as_str)));

        Ok(Delivery {
            response,
            preview_url,
        })
    }
}

pub fn auth_failure() -> TransportError {
    TransportError {
        message: "Invalid login: 535 Authentication failed".to_owned(),
        code: Some("EAUTH".to_owned()),
        response: Some("535 5.7.8 Authentication failed".to_owned()),
        response_code: Some(535),
    }
}

pub fn smtp_email_config() -> EmailConfig {
    EmailConfig {
        smtp_host: Some("smtp.example.com".to_owned()),
        smtp_port: Some(587),
        smtp_user: Some("bot@example.com".to_owned()),
        smtp_pass: Some("secret".to_owned()),
        admin_email: Some("admin@example.com".to_owned()),
        ..Default::default()
    }
}

pub fn config(environment: Environment, email: EmailConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        environment,
        email,
        preview: PreviewConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn production_config() -> Config {
    config(Environment::Production, smtp_email_config())
}

pub fn development_config() -> Config {
    config(Environment::Development, smtp_email_config())
}

pub fn app(config: Config, transports: Arc<FakeTransports>) -> Router {
    kursor::routes::router(AppState { config, transports })
}

pub async fn post_json(app: &Router, body: impl Into<Body>) -> (u16, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    json_body(response).await
}

pub async fn json_body(response: Response<Body>) -> (u16, serde_json::Value) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Submits drafts straight into the router, without a socket.
pub struct RouterSubmitter(pub Router);

#[async_trait]
impl Submitter for RouterSubmitter {
    async fn post(&self, draft: &FormDraft) -> anyhow::Result<u16> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(draft)?))?;

        let response = self.0.clone().oneshot(request).await?;

        Ok(response.status().as_u16())
    }
}
