// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook processing: event filtering, text persistence, media analysis.

use std::sync::Arc;
use std::time::Duration;

use elite_config::model::WahaConfig;
use elite_core::types::SenderRole;
use elite_core::{AgentConfigStore, EliteError, StorageAdapter};
use elite_llm::{LlmService, is_failure_text};
use tracing::{debug, error, info, instrument, warn};

use crate::media::{self, MediaKind};
use crate::message_service::MessageService;
use crate::types::{WahaMessage, WahaWebhookPayload};

/// Provider used for spreadsheet summaries, which go through the text path.
const SPREADSHEET_PROVIDER: &str = "openai";

/// Shared behind an `Arc` by the HTTP layer; each webhook runs in its own task.
pub struct WebhookProcessor {
    llm: Arc<LlmService>,
    storage: Arc<dyn StorageAdapter>,
    messages: MessageService,
    http: reqwest::Client,
    waha_api_key: Option<String>,
    download_timeout: Duration,
}

impl WebhookProcessor {
    pub fn new(
        llm: Arc<LlmService>,
        storage: Arc<dyn StorageAdapter>,
        http: reqwest::Client,
        waha: &WahaConfig,
    ) -> Self {
        Self {
            llm,
            messages: MessageService::new(storage.clone()),
            storage,
            http,
            waha_api_key: waha.api_key.clone().filter(|k| !k.is_empty()),
            download_timeout: Duration::from_secs(waha.download_timeout_secs),
        }
    }

    /// Process a webhook. Never fails; problems are logged.
    #[instrument(skip_all, fields(event = %payload.event, message_id = %payload.payload.id))]
    pub async fn process(&self, payload: &WahaWebhookPayload) {
        if !payload.is_message_event() {
            debug!("ignoring non-message event");
            return;
        }

        let message = &payload.payload;
        info!(
            from = %message.from,
            message_type = %message.message_type,
            has_media = message.has_media,
            "processing message"
        );

        let result = if message.is_media() {
            self.handle_media(message).await
        } else {
            self.handle_text(message).await;
            Ok(())
        };

        if let Err(e) = result {
            error!(error = %e, "failed to process message");
        }
    }

    async fn handle_text(&self, message: &WahaMessage) {
        let Some(body) = message.body.as_deref().filter(|b| !b.trim().is_empty()) else {
            debug!("empty text message, nothing to save");
            return;
        };
        self.persist(message, body, None).await;
    }

    async fn handle_media(&self, message: &WahaMessage) -> Result<(), EliteError> {
        if let Some(caption) = message.body.as_deref().filter(|b| !b.trim().is_empty()) {
            self.persist(message, caption, None).await;
        }

        let Some(url) = message.media_url() else {
            warn!("media message without URL");
            return Ok(());
        };
        let mime_type = message.media_mimetype();

        let Some(kind) = MediaKind::classify(mime_type) else {
            warn!(mime_type, "unsupported media type");
            return Ok(());
        };

        info!(mime_type, %kind, "downloading media");
        let bytes = media::download(
            &self.http,
            url,
            self.waha_api_key.as_deref(),
            self.download_timeout,
        )
        .await?;

        let store: &dyn AgentConfigStore = self.storage.as_ref();
        let analysis = match kind.prompt() {
            Some(prompt) => {
                self.llm
                    .analyze_media(Some(store), bytes, mime_type, prompt)
                    .await
            }
            None => {
                let csv_preview = tokio::task::spawn_blocking(move || {
                    media::tabulate_spreadsheet(bytes)
                })
                .await
                .map_err(|e| EliteError::Internal(format!("spreadsheet task failed: {e}")))??;
                self.llm
                    .analyze_conversation(
                        Some(store),
                        &media::spreadsheet_prompt(&csv_preview),
                        SPREADSHEET_PROVIDER,
                    )
                    .await
            }
        };

        if is_failure_text(&analysis) {
            warn!(%kind, result = %analysis, "media analysis failed, not saving");
            return Ok(());
        }

        debug!(%kind, chars = analysis.len(), "media analysis complete");
        self.persist(message, &analysis, Some(kind.tag())).await;
        Ok(())
    }

    async fn persist(&self, message: &WahaMessage, text: &str, tag: Option<&str>) {
        let sender = if message.from_me {
            SenderRole::Agent
        } else {
            SenderRole::Customer
        };
        let phone = message.customer_chat_id();
        let contact_name = message
            .notify_name()
            .unwrap_or_else(|| phone.trim_end_matches("@c.us"));

        self.messages
            .save_message(phone, text, sender, contact_name, tag)
            .await;
    }
}
