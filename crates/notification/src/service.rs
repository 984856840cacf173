//! Email delivery using lettre

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use crate::{TransportConfig, TransportError, preview_url};

/// A fully composed email, addresses in `Name <addr>` or bare form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub plain: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Lines of the relay's final reply.
    pub response: Vec<String>,
    pub preview_url: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Checks that the relay is reachable before anything is sent.
    async fn verify(&self) -> Result<(), TransportError>;

    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, TransportError>;
}

/// SMTP mailer for one resolved [`TransportConfig`].
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    preview_web_url: Option<String>,
}

impl SmtpMailer {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let (host, port, secure, user, password) = config.connection();

        tracing::info!(
            smtp_host = %host,
            smtp_port = port,
            secure,
            preview = config.is_preview(),
            "Building SMTP transport"
        );

        let builder = if secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .tls(Tls::Opportunistic(TlsParameters::new(host.to_owned())?))
        };

        let creds = Credentials::new(user.to_owned(), password.to_owned());

        let mailer = builder.port(port).credentials(creds).build();

        let preview_web_url = match config {
            TransportConfig::Preview(account) => Some(account.web_url.clone()),
            TransportConfig::Production(_) => None,
        };

        Ok(Self {
            mailer,
            preview_web_url,
        })
    }

    /// Builds the MIME message. Any address that is not a valid mailbox
    /// fails with `EENVELOPE` before the relay is contacted.
    pub fn message(email: &OutgoingEmail) -> Result<Message, TransportError> {
        Ok(Message::builder()
            .from(email.from.parse::<Mailbox>()?)
            .reply_to(email.reply_to.parse::<Mailbox>()?)
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.plain.clone(),
                email.html.clone(),
            ))?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn verify(&self) -> Result<(), TransportError> {
        if self.mailer.test_connection().await? {
            return Ok(());
        }

        Err(TransportError::new("SMTP connection test failed").with_code("ECONNECTION"))
    }

    #[tracing::instrument(skip_all, fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, TransportError> {
        let message = Self::message(email)?;

        tracing::info!("Sending email");

        let response = self.mailer.send(message).await?;
        let response = response.message().map(str::to_owned).collect::<Vec<_>>();

        tracing::info!(reply = %response.join(" "), "Email accepted by relay");

        let preview_url = self.preview_web_url.as_deref().and_then(|web_url| {
            preview_url(web_url, response.iter().map(String::as_str))
        });

        Ok(Delivery {
            response,
            preview_url,
        })
    }
}
