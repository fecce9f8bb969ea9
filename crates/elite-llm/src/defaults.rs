// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static model parameters used when no persisted override applies.

use elite_config::model::ModelsConfig;
use elite_core::types::ProviderKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefaults {
    /// Analysis model served by OpenAI.
    pub analysis_a: String,
    /// Analysis model served by Anthropic.
    pub analysis_b: String,
    /// Report model served by Gemini; also Gemini's analysis model.
    pub report: String,
    /// Media understanding model served by Gemini.
    pub media: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub system_prompt: String,
}

impl ModelDefaults {
    pub fn from_config(models: &ModelsConfig) -> Self {
        Self {
            analysis_a: models.analysis_a.clone(),
            analysis_b: models.analysis_b.clone(),
            report: models.report.clone(),
            media: models.media.clone(),
            temperature: models.default_temperature,
            max_tokens: models.default_max_tokens,
            system_prompt: models.default_system_prompt.clone(),
        }
    }

    /// Default model for text analysis on `kind`.
    pub fn analysis_model(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAi => &self.analysis_a,
            ProviderKind::Anthropic => &self.analysis_b,
            ProviderKind::Gemini => &self.report,
        }
    }
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self::from_config(&ModelsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_model_per_provider() {
        let defaults = ModelDefaults::default();
        assert_eq!(defaults.analysis_model(ProviderKind::OpenAi), "gpt-5.2-mini");
        assert_eq!(defaults.analysis_model(ProviderKind::Anthropic), "claude-4.5-sonnet");
        assert_eq!(defaults.analysis_model(ProviderKind::Gemini), "gemini-3.0-pro");
        assert_eq!(defaults.media, "gemini-3.0-flash");
        assert_eq!(defaults.system_prompt, "You are an expert analyst.");
    }
}
