// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use elite_core::traits::provider::ProviderAdapter;
use elite_core::types::{GenerationRequest, ProviderKind};
use elite_core::EliteError;

/// A provider that replays scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; an empty queue yields
/// `"mock response"`. Every request is recorded for later assertions.
#[derive(Clone)]
pub struct MockProvider {
    kind: ProviderKind,
    supports_media: bool,
    always_fail: Option<String>,
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    fn build(kind: ProviderKind, outcomes: VecDeque<Result<String, String>>) -> Self {
        Self {
            kind,
            supports_media: kind == ProviderKind::Gemini,
            always_fail: None,
            outcomes: Arc::new(Mutex::new(outcomes)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new(kind: ProviderKind) -> Self {
        Self::build(kind, VecDeque::new())
    }

    /// A provider pre-loaded with successful responses.
    pub fn with_responses(kind: ProviderKind, responses: Vec<String>) -> Self {
        Self::build(kind, responses.into_iter().map(Ok).collect())
    }

    /// A provider whose every call fails with `message`.
    pub fn failing(kind: ProviderKind, message: &str) -> Self {
        Self {
            always_fail: Some(message.to_string()),
            ..Self::new(kind)
        }
    }

    pub async fn add_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    pub async fn add_error(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn supports_media(&self) -> bool {
        self.supports_media
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, EliteError> {
        self.requests.lock().await.push(request);
        if let Some(message) = &self.always_fail {
            return Err(EliteError::provider(message.clone()));
        }
        match self.outcomes.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(EliteError::provider(message)),
            None => Ok("mock response".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new(ProviderKind::OpenAi);
        let out = provider
            .generate(GenerationRequest::text("m", "p"))
            .await
            .unwrap();
        assert_eq!(out, "mock response");
    }

    #[tokio::test]
    async fn scripted_outcomes_in_order_and_requests_recorded() {
        let provider = MockProvider::with_responses(ProviderKind::Anthropic, vec!["first".into()]);
        provider.add_error("boom").await;

        assert_eq!(
            provider.generate(GenerationRequest::text("m", "a")).await.unwrap(),
            "first"
        );
        let err = provider
            .generate(GenerationRequest::text("m", "b"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));

        let prompts: Vec<String> = provider
            .requests()
            .await
            .into_iter()
            .map(|r| r.prompt)
            .collect();
        assert_eq!(prompts, ["a", "b"]);
    }

    #[tokio::test]
    async fn failing_provider_always_errors() {
        let provider = MockProvider::failing(ProviderKind::Gemini, "quota");
        for _ in 0..3 {
            assert!(provider.generate(GenerationRequest::text("m", "p")).await.is_err());
        }
        assert!(provider.supports_media());
    }
}
