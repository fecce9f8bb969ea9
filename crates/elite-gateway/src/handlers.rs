// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers for health, analysis, report and webhook routes.

use axum::{Json, extract::State};
use elite_analysis::{AnalysisRequest, AnalysisResponse, ReportRequest, ReportResponse};
use elite_core::AgentConfigStore;
use elite_whatsapp::WahaWebhookPayload;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::server::AppState;

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "service": "ai_service"}))
}

/// POST /analyze
///
/// Always 200: provider and parse failures come back as the fallback shape.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Json<AnalysisResponse> {
    let store: &dyn AgentConfigStore = state.storage.as_ref();
    Json(elite_analysis::analyze_conversation(&state.llm, Some(store), &request).await)
}

/// POST /report
pub async fn report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Json<ReportResponse> {
    let store: &dyn AgentConfigStore = state.storage.as_ref();
    Json(elite_analysis::generate_strategic_report(&state.llm, Some(store), &request).await)
}

#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub status: &'static str,
    pub id: String,
}

/// POST /webhooks/waha
///
/// Returns immediately; processing continues in a background task.
pub async fn waha_webhook(
    State(state): State<AppState>,
    Json(payload): Json<WahaWebhookPayload>,
) -> Json<QueuedResponse> {
    info!(event = %payload.event, from = %payload.payload.from, "webhook received");

    let id = payload.payload.id.clone();
    let processor = state.webhooks.clone();
    tokio::spawn(async move {
        processor.process(&payload).await;
    });

    Json(QueuedResponse {
        status: "queued",
        id,
    })
}
