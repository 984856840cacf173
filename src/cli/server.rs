use std::sync::Arc;

use anyhow::Result;
use kursor::{config::Config, routes::AppState};
use kursor_notification::LettreTransports;
use tower_http::trace::TraceLayer;

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting kursor server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    if config.preview_enabled() {
        tracing::info!("Preview relay enabled, submissions will not be delivered");
    } else if let Err(missing) = config.email.smtp_settings() {
        tracing::warn!("{missing}, submissions will fail until it is provided");
    }

    let relay = if config.preview_enabled() {
        "preview"
    } else {
        "production"
    };

    let state = AppState {
        transports: Arc::new(LettreTransports::new(config.preview.clone())),
        config,
    };

    let app = kursor::routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(relay))
        .await?;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM; in-flight submissions finish on the
/// `relay` transport before the server exits.
async fn shutdown_signal(relay: &'static str) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };

    tracing::info!(signal, relay, "Draining in-flight contact submissions before shutdown");
}
