// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies for `/analyze` and `/report`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider used when a request does not name one.
pub const DEFAULT_ANALYSIS_PROVIDER: &str = "openai";

/// One line of the conversation being audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Free-form speaker label (`cliente`, `atendente`, `user`, ...).
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub conversation_id: String,
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl AnalysisRequest {
    /// Provider name to dispatch to; absent or empty falls back to `openai`.
    pub fn provider_name(&self) -> &str {
        match self.provider.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => DEFAULT_ANALYSIS_PROVIDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub conversation_id: String,
    /// Quality score, nominally 0-100.
    pub score: i64,
    pub sentiment: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestion: Option<String>,
    pub risk_level: String,
}

impl AnalysisResponse {
    /// Shape returned when the model output cannot be interpreted.
    pub fn failed(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            score: 0,
            sentiment: "Erro".to_string(),
            summary: "Falha no processamento da IA".to_string(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            suggestion: None,
            risk_level: "Desconhecido".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub tenant_id: i64,
    /// Reporting window label, e.g. `daily` or `weekly`.
    pub period: String,
    pub metrics: Map<String, Value>,
    pub alerts_summary: Map<String, Value>,
    pub attendant_performance: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub strategic_insight: String,
    pub action_items: Vec<String>,
    pub forecast: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_request_optional_fields() {
        let req: AnalysisRequest = serde_json::from_str(
            r#"{"conversation_id":"c1","messages":[{"role":"cliente","content":"oi"}]}"#,
        )
        .unwrap();
        assert_eq!(req.provider_name(), "openai");
        assert!(req.context.is_none());
        assert!(req.messages[0].timestamp.is_none());

        let req: AnalysisRequest = serde_json::from_str(
            r#"{"conversation_id":"c1","messages":[],"provider":null}"#,
        )
        .unwrap();
        assert_eq!(req.provider_name(), "openai");
    }

    #[test]
    fn failed_response_serializes_null_suggestion() {
        let json = serde_json::to_value(AnalysisResponse::failed("c9")).unwrap();
        assert_eq!(json["conversation_id"], "c9");
        assert_eq!(json["sentiment"], "Erro");
        assert_eq!(json["risk_level"], "Desconhecido");
        assert!(json["suggestion"].is_null());
    }

    #[test]
    fn report_request_requires_object_metrics() {
        let bad = r#"{"tenant_id":1,"period":"daily","metrics":[1],
                     "alerts_summary":{},"attendant_performance":[]}"#;
        assert!(serde_json::from_str::<ReportRequest>(bad).is_err());
    }
}
