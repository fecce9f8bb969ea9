// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WAHA webhook payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Events that carry a chat message.
pub const MESSAGE_EVENTS: &[&str] = &["message", "message.any"];

/// Message `type` values handled as media even when `hasMedia` is false.
pub const MEDIA_TYPES: &[&str] = &["image", "ptt", "audio", "document"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WahaWebhookPayload {
    /// `message`, `message.any`, `session.status`, ...
    pub event: String,
    pub payload: WahaMessage,
    #[serde(default = "default_session")]
    pub session: String,
    #[serde(default)]
    pub me: Option<WahaContact>,
}

fn default_session() -> String {
    "default".to_string()
}

impl WahaWebhookPayload {
    pub fn is_message_event(&self) -> bool {
        MESSAGE_EVENTS.contains(&self.event.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WahaContact {
    pub id: String,
    #[serde(default)]
    pub pushname: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WahaMedia {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WahaMessage {
    pub id: String,
    /// Chat id of the sender, e.g. `5511999999999@c.us`.
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub has_media: bool,
    #[serde(default)]
    pub media: Option<WahaMedia>,
    /// `chat`, `image`, `ptt`, `document`, `location`, ...
    #[serde(rename = "type", default = "default_message_type")]
    pub message_type: String,
    pub timestamp: i64,
    /// Raw engine data; only `notifyName` is read.
    #[serde(rename = "_data", default)]
    pub data: Option<Map<String, Value>>,
}

fn default_message_type() -> String {
    "chat".to_string()
}

impl WahaMessage {
    pub fn is_media(&self) -> bool {
        self.has_media || MEDIA_TYPES.contains(&self.message_type.as_str())
    }

    /// Chat id of the customer side of the conversation.
    pub fn customer_chat_id(&self) -> &str {
        if self.from_me {
            self.to.as_str()
        } else {
            self.from.as_str()
        }
    }

    /// Push name from the raw engine data, if present and non-empty.
    pub fn notify_name(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .get("notifyName")?
            .as_str()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media.as_ref()?.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn media_mimetype(&self) -> &str {
        self.media
            .as_ref()
            .and_then(|m| m.mimetype.as_deref())
            .unwrap_or("unknown")
    }
}
