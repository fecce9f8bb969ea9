// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini provider adapter for the Elite Finder AI service.
//!
//! Serves strategic reports and media understanding: images, audio and PDFs
//! travel as base64 `inlineData` parts next to the text prompt.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use elite_config::model::GeminiConfig;
use elite_core::error::EliteError;
use elite_core::traits::ProviderAdapter;
use elite_core::types::{GenerationRequest, ProviderKind};
use tracing::{info, warn};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};

/// Gemini provider implementing [`ProviderAdapter`].
#[derive(Debug)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Build a provider from its config section. Fails when no API key is set.
    pub fn new(config: &GeminiConfig) -> Result<Self, EliteError> {
        let api_key = match &config.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(EliteError::Config(
                    "Gemini API key not found. Set gemini.api_key in config or the GEMINI_API_KEY environment variable.".into(),
                ));
            }
        };
        let client = GeminiClient::new(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "Gemini provider initialized");
        Ok(Self { client })
    }

    /// Prompt text first, then the media part if any.
    fn to_request(request: &GenerationRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::Text {
            text: request.prompt.clone(),
        }];
        if let Some(media) = &request.media {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: media.mime_type.clone(),
                    data: STANDARD.encode(&media.data),
                },
            });
        }

        let generation_config = (request.temperature.is_some() || request.max_tokens.is_some())
            .then(|| GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: request.system_prompt.as_ref().map(|system| Content {
                role: None,
                parts: vec![Part::Text {
                    text: system.clone(),
                }],
            }),
            generation_config,
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn supports_media(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, EliteError> {
        let body = Self::to_request(&request);
        let response = self.client.generate_content(&request.model, &body).await?;
        match response.text() {
            Some(text) => Ok(text),
            None => {
                let reason = response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.clone())
                    .or_else(|| response.prompt_feedback.as_ref().map(|f| f.to_string()))
                    .unwrap_or_else(|| "no candidates".to_string());
                warn!(model = %request.model, %reason, "gemini returned no text");
                Err(EliteError::provider(format!(
                    "Gemini returned no text ({reason})"
                )))
            }
        }
    }
}
