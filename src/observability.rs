use anyhow::Result;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Initialize tracing and logging
///
/// - Structured JSON logging in production
/// - Console logging otherwise
/// - `RUST_LOG` overrides the configured level
pub fn init_observability(
    service_name: &str,
    service_version: &str,
    log_level: &str,
    environment: Environment,
) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if environment.is_production() {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_filter(env_filter))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init()?;
    }

    tracing::info!(
        service.name = service_name,
        service.version = service_version,
        environment = %environment,
        "Observability initialized"
    );

    Ok(())
}
