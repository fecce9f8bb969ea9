// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router assembly and the HTTP server loop.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use elite_core::{EliteError, StorageAdapter};
use elite_llm::LlmService;
use elite_whatsapp::WebhookProcessor;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::auth::{AuthConfig, api_key_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<LlmService>,
    pub storage: Arc<dyn StorageAdapter>,
    pub webhooks: Arc<WebhookProcessor>,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// All routes with their middleware.
///
/// Only `/analyze` and `/report` sit behind the API key.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/report", post(handlers::report))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            api_key_middleware,
        ));

    let admin = Router::new()
        .route(
            "/config",
            get(admin::list_configs).post(admin::upsert_config),
        )
        .route("/tickets", get(admin::list_tickets))
        .route("/tickets/{id}/messages", get(admin::ticket_messages))
        .route("/tickets/{id}/close", post(admin::close_ticket));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/webhooks/waha", post(handlers::waha_webhook))
        .nest("/admin", admin)
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: AppState,
    shutdown: F,
) -> Result<(), EliteError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EliteError::Channel {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("AI service listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EliteError::Channel {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
