// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.

use std::time::Duration;

use elite_core::EliteError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Bearer-authenticated client for `/v1/chat/completions`.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(api_key: &str, base_url: String, timeout: Duration) -> Result<Self, EliteError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| EliteError::Config(format!("invalid API key header value: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| EliteError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client, base_url })
    }

    /// Send one chat completion request. No retries.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, EliteError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| EliteError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "openai response received");

        let body = response.text().await.map_err(|e| EliteError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(EliteError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| EliteError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-5.2-mini".into(),
            messages: vec![
                ChatMessage::new("system", "You are an expert analyst."),
                ChatMessage::new("user", "Olá"),
            ],
            temperature: Some(0.7),
            max_tokens: Some(2000),
        }
    }

    #[tokio::test]
    async fn chat_sends_bearer_and_parses_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-5.2-mini",
                "max_tokens": 2000,
                "messages": [
                    {"role": "system", "content": "You are an expert analyst."},
                    {"role": "user", "content": "Olá"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "model": "gpt-5.2-mini",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Tudo certo."},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-test", server.uri(), Duration::from_secs(5)).unwrap();
        let resp = client.chat(&request()).await.unwrap();
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("Tudo certo."));
        assert_eq!(resp.usage.unwrap().completion_tokens, 3);
    }

    #[tokio::test]
    async fn error_envelope_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new("sk-bad", server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.chat(&request()).await.unwrap_err().to_string();
        assert!(err.contains("Incorrect API key provided"), "got: {err}");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client =
            OpenAiClient::new("sk-secret", "http://localhost".into(), Duration::from_secs(1))
                .unwrap();
        assert!(!format!("{client:?}").contains("sk-secret"));
    }
}
