// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the storage, provider and HTTP layers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The LLM vendors the service can dispatch to.
///
/// Parsing is case-insensitive so `"OpenAI"` and `"openai"` both resolve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

/// Lifecycle status of a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closed,
}

/// Who sent a message within a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Customer,
    Agent,
}

/// A customer-service conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub channel: String,
    pub customer_id: i64,
    pub agent_id: i64,
    pub status: TicketStatus,
    pub customer_name: String,
    pub customer_phone: Option<String>,
}

/// A persisted message belonging to exactly one ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub ticket_id: i64,
    pub content: String,
    pub sender: SenderRole,
    pub sent_at: String,
    pub analysis_tag: Option<String>,
}

/// A message to persist against the ticket of its phone number.
///
/// `phone` is the raw WhatsApp chat id (e.g. `5511999999999@c.us`);
/// normalization happens in the storage layer.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub phone: String,
    pub content: String,
    pub sender: SenderRole,
    pub contact_name: String,
    pub analysis_tag: Option<String>,
}

/// Per-provider parameter overrides persisted by the admin endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub provider: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_is_active() -> bool {
    true
}

/// Inline binary content attached to a generation request.
#[derive(Clone)]
pub struct MediaPart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for MediaPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPart")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A single-shot generation request handed to a provider adapter.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub media: Option<MediaPart>,
}

impl GenerationRequest {
    /// A plain text request with no sampling overrides.
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_prompt: None,
            temperature: None,
            max_tokens: None,
            media: None,
        }
    }
}

/// Current UTC time in the millisecond RFC 3339 form used for stored timestamps.
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
