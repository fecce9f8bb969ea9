// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface of the status service.

use std::future::Future;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use elite_core::EliteError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::probe::{StatusProber, StatusReport};

async fn status_arquitetura(State(prober): State<Arc<StatusProber>>) -> Json<StatusReport> {
    Json(prober.report().await)
}

pub fn build_router(prober: Arc<StatusProber>) -> Router {
    Router::new()
        .route("/status-arquitetura", get(status_arquitetura))
        .with_state(prober)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind `host:port` and serve until `shutdown` resolves.
pub async fn start_status_server<F>(
    host: &str,
    port: u16,
    prober: Arc<StatusProber>,
    shutdown: F,
) -> Result<(), EliteError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EliteError::Channel {
            message: format!("failed to bind status server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Status server listening on {addr}");

    axum::serve(listener, build_router(prober))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EliteError::Channel {
            message: format!("status server error: {e}"),
            source: Some(Box::new(e)),
        })
}
