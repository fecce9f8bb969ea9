// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `models/{model}:generateContent` endpoint.

use std::time::Duration;

use elite_core::EliteError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Client authenticated with the `x-goog-api-key` header.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    /// `base_url` is the models collection, e.g. `.../v1beta/models`.
    pub fn new(api_key: &str, base_url: String, timeout: Duration) -> Result<Self, EliteError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| EliteError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| EliteError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/{model}:generateContent", self.base_url)
    }

    /// Send one request to `model`. No retries.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, EliteError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .json(request)
            .send()
            .await
            .map_err(|e| EliteError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "gemini response received");

        let body = response.text().await.map_err(|e| EliteError::Provider {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "Gemini API error ({} {}): {}",
                    api_err.error.code, api_err.error.status, api_err.error.message
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
    use crate::types::{Content, Part};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part::Text { text: "oi".into() }],
            }],
            system_instruction: None,
            generation_config: None,
        }
    }

    #[test]
    fn endpoint_accepts_bare_and_prefixed_model_names() {
        let client = GeminiClient::new(
            "k",
            "https://generativelanguage.googleapis.com/v1beta/models/".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        let expected =
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3.0-pro:generateContent";
        assert_eq!(client.endpoint("gemini-3.0-pro"), expected);
        assert_eq!(client.endpoint("models/gemini-3.0-pro"), expected);
    }

    #[tokio::test]
    async fn posts_to_model_endpoint_with_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3.0-flash:generateContent"))
            .and(header("x-goog-api-key", "gm-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}, "finishReason": "STOP"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            "gm-test",
            format!("{}/v1beta/models", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();
        let resp = client
            .generate_content("gemini-3.0-flash", &request())
            .await
            .unwrap();
        assert_eq!(resp.text().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn error_envelope_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("bad", server.uri(), Duration::from_secs(5)).unwrap();
        let err = client
            .generate_content("gemini-3.0-pro", &request())
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("INVALID_ARGUMENT"), "got: {err}");
        assert!(err.contains("API key not valid"), "got: {err}");
    }
}
