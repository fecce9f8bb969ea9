// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic provider adapter for the Elite Finder AI service.
//!
//! Implements [`ProviderAdapter`] over the Anthropic Messages API. Text only;
//! media understanding is routed to Gemini.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use elite_config::model::AnthropicConfig;
use elite_core::error::EliteError;
use elite_core::traits::ProviderAdapter;
use elite_core::types::{GenerationRequest, ProviderKind};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Token budget used when the caller leaves `max_tokens` unset; the API requires one.
const FALLBACK_MAX_TOKENS: u32 = 2000;

/// Anthropic provider implementing [`ProviderAdapter`].
#[derive(Debug)]
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    /// Build a provider from its config section. Fails when no API key is set.
    pub fn new(config: &AnthropicConfig) -> Result<Self, EliteError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = AnthropicClient::new(
            &api_key,
            &config.api_version,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "Anthropic provider initialized");
        Ok(Self { client })
    }

    #[cfg(test)]
    fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    fn to_message_request(request: GenerationRequest) -> MessageRequest {
        MessageRequest {
            model: request.model,
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            system: request.system_prompt,
            max_tokens: request.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, EliteError> {
        if request.media.is_some() {
            return Err(EliteError::provider(
                "Anthropic adapter does not accept inline media",
            ));
        }
        let response = self
            .client
            .complete_message(&Self::to_message_request(request))
            .await?;
        debug!(
            id = %response.id,
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "anthropic completion"
        );
        Ok(response.text())
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<String, EliteError> {
    match config_key {
        Some(key) if !key.trim().is_empty() => Ok(key.clone()),
        _ => Err(EliteError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or the ANTHROPIC_API_KEY environment variable.".into(),
        )),
    }
}
