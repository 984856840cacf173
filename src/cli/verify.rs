use kursor::config::Config;
use kursor_notification::{LettreTransports, TransportConfig, Transports};

/// Runs the pre-flight check against the production SMTP settings.
pub async fn verify(config: Config) -> anyhow::Result<()> {
    let settings = config.email.smtp_settings()?;
    let host = settings.host.to_owned();

    let transports = LettreTransports::new(config.preview);
    let mailer = transports.connect(&TransportConfig::Production(settings))?;

    if let Err(err) = mailer.verify().await {
        tracing::error!(
            smtp_host = %host,
            code = ?err.code,
            response_code = ?err.response_code,
            "SMTP verification failed: {err}"
        );
        anyhow::bail!("SMTP verification failed");
    }

    tracing::info!(smtp_host = %host, "SMTP transport verified");

    Ok(())
}
