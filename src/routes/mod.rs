use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use kursor_notification::Transports;
use serde_json::json;

pub mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub transports: Arc<dyn Transports>,
}

pub async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"})))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoint (no state required)
        .route("/health", get(health::health))
        .route("/contact", get(contact::page))
        .route("/api/contact", post(contact::action))
        .fallback(fallback)
        .with_state(app_state)
}
