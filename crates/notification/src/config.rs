use serde::Deserialize;

pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";
pub const CONTACT_ADMIN_EMAIL: &str = "CONTACT_ADMIN_EMAIL";

/// Outbound email settings. Every SMTP value is optional here and checked per
/// request by [`EmailConfig::smtp_settings`].
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub smtp_port: Option<u16>,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,
    /// Implicit TLS (usually port 465) instead of STARTTLS.
    #[serde(default)]
    pub smtp_secure: bool,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Skip the pre-flight connection check outside production.
    #[serde(default)]
    pub skip_verify: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_pass: None,
            smtp_secure: false,
            admin_email: None,
            from_name: default_from_name(),
            skip_verify: false,
        }
    }
}

fn default_from_name() -> String {
    "Kursor Contact".to_string()
}

/// Production SMTP settings with every required value present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub password: String,
    pub admin_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing env: {}", .0.join(", "))]
pub struct MissingConfig(pub Vec<&'static str>);

impl EmailConfig {
    pub fn smtp_settings(&self) -> Result<SmtpSettings, MissingConfig> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        let host = present(&self.smtp_host);
        let user = present(&self.smtp_user);
        let password = present(&self.smtp_pass);
        let admin_email = present(&self.admin_email);

        let missing = [
            (SMTP_HOST, host.is_none()),
            (SMTP_PORT, self.smtp_port.is_none()),
            (SMTP_USER, user.is_none()),
            (SMTP_PASS, password.is_none()),
            (CONTACT_ADMIN_EMAIL, admin_email.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, missing)| missing.then_some(key))
        .collect::<Vec<_>>();

        match (host, self.smtp_port, user, password, admin_email) {
            (Some(host), Some(port), Some(user), Some(password), Some(admin_email)) => {
                Ok(SmtpSettings {
                    host: host.to_owned(),
                    port,
                    secure: self.smtp_secure,
                    user: user.to_owned(),
                    password: password.to_owned(),
                    admin_email: admin_email.to_owned(),
                })
            }
            _ => Err(MissingConfig(missing)),
        }
    }
}

/// Ethereal preview relay used for local development.
#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_preview_api_url")]
    pub api_url: String,
    #[serde(default = "default_preview_relay_host")]
    pub relay_host: String,
    #[serde(default = "default_preview_relay_port")]
    pub relay_port: u16,
    #[serde(default = "default_preview_web_url")]
    pub web_url: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_preview_api_url(),
            relay_host: default_preview_relay_host(),
            relay_port: default_preview_relay_port(),
            web_url: default_preview_web_url(),
        }
    }
}

fn default_preview_api_url() -> String {
    "https://api.nodemailer.com".to_string()
}

fn default_preview_relay_host() -> String {
    "smtp.ethereal.email".to_string()
}

fn default_preview_relay_port() -> u16 {
    587
}

fn default_preview_web_url() -> String {
    "https://ethereal.email".to_string()
}
