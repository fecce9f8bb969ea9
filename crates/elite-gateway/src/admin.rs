// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent configuration CRUD and ticket administration.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use elite_core::EliteError;
use elite_core::types::{AgentConfig, Message, Ticket, TicketStatus};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::server::AppState;

/// GET /admin/config
pub async fn list_configs(State(state): State<AppState>) -> Result<Json<Vec<AgentConfig>>, ApiError> {
    Ok(Json(state.storage.list_agent_configs().await?))
}

/// POST /admin/config
///
/// Upserts by provider name and echoes the stored body.
pub async fn upsert_config(
    State(state): State<AppState>,
    Json(config): Json<AgentConfig>,
) -> Result<Json<AgentConfig>, ApiError> {
    state.storage.upsert_agent_config(&config).await?;
    info!(provider = %config.provider, model = %config.model, "agent config saved");
    Ok(Json(config))
}

#[derive(Debug, Default, Deserialize)]
pub struct TicketFilter {
    #[serde(default)]
    pub status: Option<TicketStatus>,
}

/// GET /admin/tickets?status=open|closed
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(state.storage.list_tickets(filter.status).await?))
}

/// GET /admin/tickets/{id}/messages
pub async fn ticket_messages(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    if state.storage.get_ticket(id).await?.is_none() {
        return Err(not_found(id).into());
    }
    Ok(Json(state.storage.get_messages(id).await?))
}

/// POST /admin/tickets/{id}/close
pub async fn close_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    let ticket = state
        .storage
        .close_ticket(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    info!(ticket_id = id, "ticket closed");
    Ok(Json(ticket))
}

fn not_found(id: i64) -> EliteError {
    EliteError::NotFound {
        entity: "ticket".to_string(),
        id: id.to_string(),
    }
}
