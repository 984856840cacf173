use config::{Config as ConfigBuilder, ConfigError, Environment as EnvSource, File};
use kursor_notification::{EmailConfig, PreviewConfig};
use serde::Deserialize;
use std::env;
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Execution mode. Anything but production exposes transport diagnostics in
/// error responses and enables the preview relay and pre-flight check.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Unprefixed variables and the keys they override.
const LEGACY_ENV: [(&str, &str); 5] = [
    ("SMTP_HOST", "email.smtp_host"),
    ("SMTP_PORT", "email.smtp_port"),
    ("SMTP_USER", "email.smtp_user"),
    ("SMTP_PASS", "email.smtp_pass"),
    ("CONTACT_ADMIN_EMAIL", "email.admin_email"),
];

/// Unprefixed toggles, on only when set to exactly `true`.
const LEGACY_FLAGS: [(&str, &str); 3] = [
    ("SMTP_SECURE", "email.smtp_secure"),
    ("SMTP_SKIP_VERIFY", "email.skip_verify"),
    ("USE_ETHEREAL", "preview.enabled"),
];

fn legacy_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Unprefixed variables (SMTP_HOST, USE_ETHEREAL, ENVIRONMENT, etc.)
    /// 2. Prefixed variables (KURSOR__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file falls back to defaults and environment
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            EnvSource::with_prefix("KURSOR")
                .separator("__")
                .try_parsing(true),
        );

        for (var, key) in LEGACY_ENV {
            if let Some(value) = legacy_env(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        for (var, key) in LEGACY_FLAGS {
            if let Some(value) = legacy_env(var) {
                builder = builder.set_override(key, value == "true")?;
            }
        }

        if let Some(environment) = legacy_env("ENVIRONMENT") {
            let environment = if environment.eq_ignore_ascii_case("production") {
                Environment::Production
            } else {
                Environment::Development
            };
            builder = builder.set_override("environment", environment.as_ref())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.from_name.trim().is_empty() {
            return Err("Email sender name must not be empty".to_string());
        }
        Ok(())
    }

    /// Preview relay is only honoured outside production.
    pub fn preview_enabled(&self) -> bool {
        !self.environment.is_production() && self.preview.enabled
    }
}
