// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch service itself.

use std::collections::HashMap;
use std::sync::Arc;

use elite_core::types::{AgentConfig, GenerationRequest, MediaPart, ProviderKind};
use elite_core::{AgentConfigStore, ProviderAdapter};
use tracing::{debug, warn};

use crate::defaults::ModelDefaults;

/// Returned when the requested provider is unknown or has no credentials.
pub const NO_PROVIDER_CONFIGURED: &str = "Nenhum provedor de análise configurado.";

/// Returned when report generation fails for any reason.
pub const REPORT_ERROR: &str = "Erro ao gerar relatório com Gemini.";

/// Prefix of the string returned when media analysis fails.
pub const MEDIA_ERROR_PREFIX: &str = "Erro ao analisar mídia:";

/// Prefix of the string returned when a vendor call for analysis fails.
pub const ANALYSIS_ERROR_PREFIX: &str = "Erro na análise";

/// Whether `text` is one of the failure strings produced by [`LlmService`]
/// rather than model output.
pub fn is_failure_text(text: &str) -> bool {
    text == NO_PROVIDER_CONFIGURED
        || text == REPORT_ERROR
        || text.starts_with(MEDIA_ERROR_PREFIX)
        || text.starts_with(ANALYSIS_ERROR_PREFIX)
}

/// Registry of provider adapters plus the static fallbacks.
///
/// Built once at startup and shared behind an `Arc`.
pub struct LlmService {
    providers: HashMap<ProviderKind, Arc<dyn ProviderAdapter>>,
    defaults: ModelDefaults,
}

impl LlmService {
    pub fn new(defaults: ModelDefaults) -> Self {
        Self {
            providers: HashMap::new(),
            defaults,
        }
    }

    /// Register an adapter under its own [`ProviderAdapter::kind`], replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn ProviderAdapter>) {
        debug!(provider = %provider.kind(), adapter = provider.name(), "registering provider");
        self.providers.insert(provider.kind(), provider);
    }

    pub fn with_provider(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.register(provider);
        self
    }

    pub fn provider(&self, kind: ProviderKind) -> Option<&Arc<dyn ProviderAdapter>> {
        self.providers.get(&kind)
    }

    /// Kinds with a registered adapter, in a stable order.
    pub fn registered(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|k| k.to_string());
        kinds
    }

    pub fn defaults(&self) -> &ModelDefaults {
        &self.defaults
    }

    /// Active persisted row for `kind`. Lookup failures are logged and treated as absent.
    async fn active_config(
        store: Option<&dyn AgentConfigStore>,
        kind: ProviderKind,
    ) -> Option<AgentConfig> {
        let store = store?;
        match store.get_agent_config(&kind.to_string()).await {
            Ok(Some(config)) if config.is_active => Some(config),
            Ok(Some(_)) => {
                debug!(provider = %kind, "agent config inactive, using defaults");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(provider = %kind, error = %e, "agent config lookup failed, using defaults");
                None
            }
        }
    }

    /// Analyze a conversation prompt with the named provider.
    ///
    /// Never fails: an unknown or unconfigured provider yields
    /// [`NO_PROVIDER_CONFIGURED`], a vendor error yields
    /// `"Erro na análise ({provider}): {error}"`.
    pub async fn analyze_conversation(
        &self,
        store: Option<&dyn AgentConfigStore>,
        prompt: &str,
        provider_name: &str,
    ) -> String {
        let Ok(kind) = provider_name.trim().parse::<ProviderKind>() else {
            warn!(provider = provider_name, "unknown analysis provider");
            return NO_PROVIDER_CONFIGURED.to_string();
        };
        let Some(provider) = self.providers.get(&kind) else {
            warn!(provider = %kind, "analysis provider not configured");
            return NO_PROVIDER_CONFIGURED.to_string();
        };

        let config = Self::active_config(store, kind).await;
        let request = GenerationRequest {
            model: config
                .as_ref()
                .map(|c| c.model.clone())
                .unwrap_or_else(|| self.defaults.analysis_model(kind).to_string()),
            prompt: prompt.to_string(),
            system_prompt: Some(
                config
                    .as_ref()
                    .and_then(|c| c.system_prompt.clone())
                    .unwrap_or_else(|| self.defaults.system_prompt.clone()),
            ),
            temperature: Some(config.as_ref().map_or(self.defaults.temperature, |c| c.temperature)),
            max_tokens: Some(config.as_ref().map_or(self.defaults.max_tokens, |c| c.max_tokens)),
            media: None,
        };

        debug!(provider = %kind, model = %request.model, "dispatching analysis");
        match provider.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(provider = %kind, error = %e, "analysis failed");
                format!("{ANALYSIS_ERROR_PREFIX} ({kind}): {e}")
            }
        }
    }

    /// Generate a strategic report with Gemini.
    ///
    /// Any failure, including a missing Gemini client, yields [`REPORT_ERROR`].
    pub async fn generate_report(&self, store: Option<&dyn AgentConfigStore>, prompt: &str) -> String {
        let Some(provider) = self.providers.get(&ProviderKind::Gemini) else {
            warn!("report requested but gemini is not configured");
            return REPORT_ERROR.to_string();
        };

        let config = Self::active_config(store, ProviderKind::Gemini).await;
        let request = Self::gemini_request(config, &self.defaults.report, prompt, None);

        debug!(model = %request.model, "dispatching report");
        match provider.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "report generation failed");
                REPORT_ERROR.to_string()
            }
        }
    }

    /// Describe, transcribe or summarize a media file with Gemini.
    ///
    /// Failures yield `"Erro ao analisar mídia: {error}"`.
    pub async fn analyze_media(
        &self,
        store: Option<&dyn AgentConfigStore>,
        data: Vec<u8>,
        mime_type: &str,
        prompt: &str,
    ) -> String {
        let provider = match self.providers.get(&ProviderKind::Gemini) {
            Some(provider) if provider.supports_media() => provider,
            _ => {
                warn!(mime_type, "media analysis requested but gemini is not configured");
                return format!("{MEDIA_ERROR_PREFIX} provedor gemini não configurado");
            }
        };

        let config = Self::active_config(store, ProviderKind::Gemini).await;
        let media = MediaPart {
            mime_type: mime_type.to_string(),
            data,
        };
        let request = Self::gemini_request(config, &self.defaults.media, prompt, Some(media));

        debug!(model = %request.model, mime_type, "dispatching media analysis");
        match provider.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(mime_type, error = %e, "media analysis failed");
                format!("{MEDIA_ERROR_PREFIX} {e}")
            }
        }
    }

    /// Report and media calls take the model from the `gemini` row when one
    /// is active, and its sampling parameters along with it. Without a row
    /// the vendor's own sampling defaults apply.
    fn gemini_request(
        config: Option<AgentConfig>,
        default_model: &str,
        prompt: &str,
        media: Option<MediaPart>,
    ) -> GenerationRequest {
        let mut request = GenerationRequest::text(default_model, prompt);
        request.media = media;
        if let Some(config) = config {
            request.model = config.model;
            request.temperature = Some(config.temperature);
            request.max_tokens = Some(config.max_tokens);
            request.system_prompt = config.system_prompt;
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elite_test_utils::{MockConfigStore, MockProvider};
    use tracing_test::traced_test;

    fn row(provider: &str, model: &str) -> AgentConfig {
        AgentConfig {
            provider: provider.to_string(),
            model: model.to_string(),
            temperature: 0.1,
            max_tokens: 321,
            system_prompt: Some("Prompt salvo.".to_string()),
            is_active: true,
        }
    }

    fn service_with(providers: &[&MockProvider]) -> LlmService {
        providers.iter().fold(LlmService::new(ModelDefaults::default()), |svc, p| {
            svc.with_provider(Arc::new((*p).clone()))
        })
    }

    #[tokio::test]
    async fn unknown_provider_name_is_not_configured() {
        let openai = MockProvider::new(ProviderKind::OpenAi);
        let svc = service_with(&[&openai]);
        let out = svc.analyze_conversation(None, "p", "mistral").await;
        assert_eq!(out, NO_PROVIDER_CONFIGURED);
        assert!(openai.requests().await.is_empty());
    }

    #[tokio::test]
    async fn known_provider_without_client_is_not_configured() {
        let openai = MockProvider::new(ProviderKind::OpenAi);
        let svc = service_with(&[&openai]);
        assert_eq!(
            svc.analyze_conversation(None, "p", "anthropic").await,
            NO_PROVIDER_CONFIGURED
        );
        assert!(openai.requests().await.is_empty(), "no fallthrough to openai");
    }

    #[tokio::test]
    async fn defaults_apply_without_store() {
        let openai = MockProvider::with_responses(ProviderKind::OpenAi, vec!["ok".into()]);
        let svc = service_with(&[&openai]);

        assert_eq!(svc.analyze_conversation(None, "transcript", "OpenAI").await, "ok");

        let req = openai.last_request().await.unwrap();
        assert_eq!(req.model, "gpt-5.2-mini");
        assert_eq!(req.prompt, "transcript");
        assert_eq!(req.system_prompt.as_deref(), Some("You are an expert analyst."));
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.max_tokens, Some(2000));
    }

    #[tokio::test]
    async fn persisted_row_overrides_defaults() {
        let anthropic = MockProvider::new(ProviderKind::Anthropic);
        let svc = service_with(&[&anthropic]);
        let store = MockConfigStore::new();
        store.insert(row("anthropic", "claude-custom")).await;

        svc.analyze_conversation(Some(&store), "p", "anthropic").await;

        let req = anthropic.last_request().await.unwrap();
        assert_eq!(req.model, "claude-custom");
        assert_eq!(req.temperature, Some(0.1));
        assert_eq!(req.max_tokens, Some(321));
        assert_eq!(req.system_prompt.as_deref(), Some("Prompt salvo."));
    }

    #[tokio::test]
    async fn inactive_row_and_store_errors_fall_back_to_defaults() {
        let openai = MockProvider::new(ProviderKind::OpenAi);
        let svc = service_with(&[&openai]);

        let store = MockConfigStore::new();
        let mut inactive = row("openai", "gpt-disabled");
        inactive.is_active = false;
        store.insert(inactive).await;
        svc.analyze_conversation(Some(&store), "p", "openai").await;
        assert_eq!(openai.last_request().await.unwrap().model, "gpt-5.2-mini");

        let broken = MockConfigStore::failing();
        svc.analyze_conversation(Some(&broken), "p", "openai").await;
        assert_eq!(openai.last_request().await.unwrap().model, "gpt-5.2-mini");
    }

    #[tokio::test]
    #[traced_test]
    async fn store_failure_is_logged() {
        let openai = MockProvider::new(ProviderKind::OpenAi);
        let svc = service_with(&[&openai]);
        svc.analyze_conversation(Some(&MockConfigStore::failing()), "p", "openai")
            .await;
        assert!(logs_contain("agent config lookup failed"));
    }

    #[tokio::test]
    async fn vendor_error_becomes_analysis_error_string() {
        let openai = MockProvider::failing(ProviderKind::OpenAi, "rate limited");
        let svc = service_with(&[&openai]);
        let out = svc.analyze_conversation(None, "p", "openai").await;
        assert!(out.starts_with("Erro na análise (openai): "), "got: {out}");
        assert!(out.contains("rate limited"));
    }

    #[tokio::test]
    async fn gemini_can_serve_analysis_with_report_model() {
        let gemini = MockProvider::new(ProviderKind::Gemini);
        let svc = service_with(&[&gemini]);
        svc.analyze_conversation(None, "p", "gemini").await;
        assert_eq!(gemini.last_request().await.unwrap().model, "gemini-3.0-pro");
    }

    #[tokio::test]
    async fn report_uses_gemini_report_model() {
        let gemini = MockProvider::with_responses(ProviderKind::Gemini, vec!["{}".into()]);
        let svc = service_with(&[&gemini]);

        assert_eq!(svc.generate_report(None, "cso prompt").await, "{}");
        let req = gemini.last_request().await.unwrap();
        assert_eq!(req.model, "gemini-3.0-pro");
        assert!(req.temperature.is_none());
        assert!(req.media.is_none());
    }

    #[tokio::test]
    async fn report_errors_collapse_to_fixed_string() {
        let svc = service_with(&[]);
        assert_eq!(svc.generate_report(None, "p").await, REPORT_ERROR);

        let gemini = MockProvider::failing(ProviderKind::Gemini, "quota");
        let svc = service_with(&[&gemini]);
        assert_eq!(svc.generate_report(None, "p").await, REPORT_ERROR);
    }

    #[tokio::test]
    async fn media_goes_inline_to_media_model() {
        let gemini = MockProvider::with_responses(ProviderKind::Gemini, vec!["descrição".into()]);
        let svc = service_with(&[&gemini]);

        let out = svc
            .analyze_media(None, vec![0xFF, 0xD8], "image/jpeg", "Descreva")
            .await;
        assert_eq!(out, "descrição");

        let req = gemini.last_request().await.unwrap();
        assert_eq!(req.model, "gemini-3.0-flash");
        let media = req.media.unwrap();
        assert_eq!(media.mime_type, "image/jpeg");
        assert_eq!(media.data, vec![0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn gemini_row_overrides_media_model() {
        let gemini = MockProvider::new(ProviderKind::Gemini);
        let svc = service_with(&[&gemini]);
        let store = MockConfigStore::new();
        store.insert(row("gemini", "gemini-custom")).await;

        svc.analyze_media(Some(&store), vec![1], "audio/ogg", "Transcreva").await;
        assert_eq!(gemini.last_request().await.unwrap().model, "gemini-custom");
    }

    #[tokio::test]
    async fn media_errors_are_prefixed() {
        let svc = service_with(&[]);
        let out = svc.analyze_media(None, vec![1], "application/pdf", "Resuma").await;
        assert!(out.starts_with(MEDIA_ERROR_PREFIX), "got: {out}");

        let gemini = MockProvider::failing(ProviderKind::Gemini, "too large");
        let svc = service_with(&[&gemini]);
        let out = svc.analyze_media(None, vec![1], "application/pdf", "Resuma").await;
        assert!(out.starts_with("Erro ao analisar mídia: "), "got: {out}");
        assert!(out.contains("too large"));
    }

    #[test]
    fn registered_lists_kinds_in_stable_order() {
        let svc = service_with(&[
            &MockProvider::new(ProviderKind::OpenAi),
            &MockProvider::new(ProviderKind::Gemini),
        ]);
        assert_eq!(svc.registered(), [ProviderKind::Gemini, ProviderKind::OpenAi]);
        assert!(svc.provider(ProviderKind::Anthropic).is_none());
    }

    #[tokio::test]
    async fn failure_strings_are_recognized() {
        let openai = MockProvider::failing(ProviderKind::OpenAi, "boom");
        let svc = service_with(&[&openai]);

        let failed = svc.analyze_conversation(None, "p", "openai").await;
        assert!(is_failure_text(&failed), "got: {failed}");
        assert!(is_failure_text(NO_PROVIDER_CONFIGURED));
        assert!(is_failure_text(REPORT_ERROR));
        let media = svc.analyze_media(None, vec![1], "image/png", "p").await;
        assert!(is_failure_text(&media), "got: {media}");

        assert!(!is_failure_text("Cliente satisfeito com o atendimento."));
    }
}
