use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Mailer, PreviewConfig, SmtpMailer, SmtpSettings, TransportError};

/// Throwaway Ethereal mailbox; mail sent through it is captured, not delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewAccount {
    pub user: String,
    pub password: String,
    pub relay_host: String,
    pub relay_port: u16,
    pub web_url: String,
}

/// Where one submission is relayed, picked once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Production(SmtpSettings),
    Preview(PreviewAccount),
}

impl TransportConfig {
    pub fn is_preview(&self) -> bool {
        matches!(self, TransportConfig::Preview(_))
    }

    /// Admin address, or the preview mailbox itself.
    pub fn recipient(&self) -> &str {
        match self {
            TransportConfig::Production(settings) => &settings.admin_email,
            TransportConfig::Preview(account) => &account.user,
        }
    }

    /// Account the message is sent from.
    pub fn sender(&self) -> &str {
        match self {
            TransportConfig::Production(settings) => &settings.user,
            TransportConfig::Preview(account) => &account.user,
        }
    }

    /// host, port, implicit TLS, user, password
    pub(crate) fn connection(&self) -> (&str, u16, bool, &str, &str) {
        match self {
            TransportConfig::Production(s) => (&s.host, s.port, s.secure, &s.user, &s.password),
            TransportConfig::Preview(a) => (&a.relay_host, a.relay_port, false, &a.user, &a.password),
        }
    }
}

/// Builds mail transports; swapped out in tests.
#[async_trait]
pub trait Transports: Send + Sync {
    async fn provision_preview(&self) -> Result<PreviewAccount, TransportError>;

    fn connect(&self, config: &TransportConfig) -> Result<Box<dyn Mailer>, TransportError>;
}

#[derive(Serialize)]
struct ProvisionRequest<'a> {
    requestor: &'a str,
    version: &'a str,
}

#[derive(Deserialize)]
struct ProvisionResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    pass: Option<String>,
    #[serde(default)]
    web: Option<String>,
}

/// lettre SMTP transports, with preview accounts provisioned over the
/// Ethereal HTTP API.
#[derive(Clone)]
pub struct LettreTransports {
    client: reqwest::Client,
    preview: PreviewConfig,
}

impl LettreTransports {
    pub fn new(preview: PreviewConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            preview,
        }
    }

    fn account(&self, response: ProvisionResponse) -> Result<PreviewAccount, TransportError> {
        if response.status != "success" {
            let reason = response.error.unwrap_or_else(|| response.status.clone());
            return Err(
                TransportError::new(format!("failed to create preview account: {reason}"))
                    .with_code("EPROVISION")
                    .with_response(response.status),
            );
        }

        let (Some(user), Some(password)) = (response.user, response.pass) else {
            return Err(
                TransportError::new("preview account response is missing credentials")
                    .with_code("EPROVISION"),
            );
        };

        Ok(PreviewAccount {
            user,
            password,
            relay_host: self.preview.relay_host.clone(),
            relay_port: self.preview.relay_port,
            web_url: response.web.unwrap_or_else(|| self.preview.web_url.clone()),
        })
    }
}

#[async_trait]
impl Transports for LettreTransports {
    #[tracing::instrument(skip_all, fields(api_url = %self.preview.api_url))]
    async fn provision_preview(&self) -> Result<PreviewAccount, TransportError> {
        let url = format!("{}/user", self.preview.api_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .json(&ProvisionRequest {
                requestor: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            })
            .send()
            .await?
            .error_for_status()?
            .json::<ProvisionResponse>()
            .await?;

        let account = self.account(response)?;

        tracing::info!(user = %account.user, "Preview account provisioned");

        Ok(account)
    }

    fn connect(&self, config: &TransportConfig) -> Result<Box<dyn Mailer>, TransportError> {
        Ok(Box::new(SmtpMailer::new(config)?))
    }
}

/// Viewing link for a message accepted by the preview relay, read from the
/// `[... MSGID=<id>]` token that closes its reply.
pub fn preview_url<'a>(
    web_url: &str,
    response: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    let reply = response.into_iter().collect::<Vec<_>>().join(" ");
    let (_, token) = reply.trim_end().strip_suffix(']')?.rsplit_once('[')?;

    token
        .split_whitespace()
        .find_map(|pair| pair.strip_prefix("MSGID="))
        .filter(|id| !id.is_empty())
        .map(|id| format!("{}/message/{id}", web_url.trim_end_matches('/')))
}
