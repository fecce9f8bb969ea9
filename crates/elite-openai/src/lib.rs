// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for the Elite Finder AI service.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use elite_config::model::OpenAiConfig;
use elite_core::error::EliteError;
use elite_core::traits::ProviderAdapter;
use elite_core::types::{GenerationRequest, ProviderKind};
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// OpenAI provider implementing [`ProviderAdapter`] over Chat Completions.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Build a provider from its config section. Fails when no API key is set.
    pub fn new(config: &OpenAiConfig) -> Result<Self, EliteError> {
        let api_key = match &config.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(EliteError::Config(
                    "OpenAI API key not found. Set openai.api_key in config or the OPENAI_API_KEY environment variable.".into(),
                ));
            }
        };
        let client = OpenAiClient::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "OpenAI provider initialized");
        Ok(Self { client })
    }

    /// System message first (when present), then the single user message.
    fn to_chat_request(request: GenerationRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt {
            messages.push(ChatMessage::new("system", system));
        }
        messages.push(ChatMessage::new("user", request.prompt));
        ChatRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, EliteError> {
        if request.media.is_some() {
            return Err(EliteError::provider(
                "OpenAI adapter does not accept inline media",
            ));
        }
        let response = self.client.chat(&Self::to_chat_request(request)).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| EliteError::provider("OpenAI response contained no choices"))?;
        debug!(
            id = %response.id,
            model = %response.model,
            finish_reason = ?choice.finish_reason,
            "openai completion"
        );
        Ok(choice.message.content.unwrap_or_default())
    }
}
