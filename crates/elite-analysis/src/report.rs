// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategic report generation over aggregated tenant metrics.

use elite_core::AgentConfigStore;
use elite_llm::LlmService;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::parse::parse_object;
use crate::types::{ReportRequest, ReportResponse};

/// Raw text kept as the insight when the report does not parse.
const RAW_INSIGHT_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(default = "no_insight")]
    strategic_insight: String,
    #[serde(default)]
    action_items: Vec<String>,
    #[serde(default = "no_forecast")]
    forecast: String,
}

fn no_insight() -> String {
    "Sem insights gerados".to_string()
}

fn no_forecast() -> String {
    "Sem previsão".to_string()
}

fn compact<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| Value::Null.to_string())
}

pub fn build_prompt(request: &ReportRequest) -> String {
    let period = &request.period;
    let metrics = compact(&request.metrics);
    let alerts = compact(&request.alerts_summary);
    let performance = compact(&request.attendant_performance);

    format!(
        r#"Atue como um Diretor de Estratégia (CSO) para esta empresa.
Gere um relatório de inteligência baseado nos dados abaixo.

PERÍODO: {period}

MÉTRICAS GERAIS:
{metrics}

ALERTAS E RISCOS:
{alerts}

PERFORMANCE DA EQUIPE:
{performance}

Gere uma resposta estruturada contendo:
1. Insight Estratégico (Uma visão macro do que está acontecendo)
2. Lista de Ações Recomendadas (Práticas e diretas)
3. Previsão/Tendência (O que esperar para o próximo período se nada mudar)

Responda EXCLUSIVAMENTE em JSON:
{{
    "strategic_insight": "...",
    "action_items": ["...", "..."],
    "forecast": "..."
}}
"#
    )
}

pub fn parse_report(raw: &str) -> ReportResponse {
    match parse_object::<Report>(raw) {
        Ok(r) => ReportResponse {
            strategic_insight: r.strategic_insight,
            action_items: r.action_items,
            forecast: r.forecast,
        },
        Err(e) => {
            warn!(error = %e, "could not parse report output, returning raw text");
            ReportResponse {
                strategic_insight: raw.chars().take(RAW_INSIGHT_CHARS).collect(),
                action_items: Vec::new(),
                forecast: "Erro ao estruturar resposta".to_string(),
            }
        }
    }
}

pub async fn generate_strategic_report(
    llm: &LlmService,
    store: Option<&dyn AgentConfigStore>,
    request: &ReportRequest,
) -> ReportResponse {
    debug!(tenant_id = request.tenant_id, period = %request.period, "generating report");
    let raw = llm.generate_report(store, &build_prompt(request)).await;
    parse_report(&raw)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use elite_core::types::ProviderKind;
    use elite_llm::{ModelDefaults, REPORT_ERROR};
    use elite_test_utils::MockProvider;
    use serde_json::json;

    fn request() -> ReportRequest {
        serde_json::from_value(json!({
            "tenant_id": 7,
            "period": "weekly",
            "metrics": {"tickets": 120, "csat": 4.6},
            "alerts_summary": {"alto_risco": 3},
            "attendant_performance": [{"nome": "Ana", "score": 88}]
        }))
        .unwrap()
    }

    #[test]
    fn prompt_embeds_request_data() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("PERÍODO: weekly"));
        assert!(prompt.contains(r#""tickets":120"#));
        assert!(prompt.contains(r#""alto_risco":3"#));
        assert!(prompt.contains(r#""nome":"Ana""#));
    }

    #[test]
    fn defaults_for_missing_keys() {
        let resp = parse_report(r#"{"action_items": ["Treinar equipe"]}"#);
        assert_eq!(resp.strategic_insight, "Sem insights gerados");
        assert_eq!(resp.action_items, ["Treinar equipe"]);
        assert_eq!(resp.forecast, "Sem previsão");
    }

    #[test]
    fn unparseable_keeps_first_500_chars() {
        let raw = "á".repeat(600);
        let resp = parse_report(&raw);
        assert_eq!(resp.strategic_insight.chars().count(), 500);
        assert!(resp.action_items.is_empty());
        assert_eq!(resp.forecast, "Erro ao estruturar resposta");
    }

    #[tokio::test]
    async fn report_goes_to_gemini() {
        let gemini = MockProvider::with_responses(
            ProviderKind::Gemini,
            vec![
                "```json\n{\"strategic_insight\":\"Demanda cresce\",\"action_items\":[],\"forecast\":\"Alta\"}\n```"
                    .to_string(),
            ],
        );
        let llm = LlmService::new(ModelDefaults::default()).with_provider(Arc::new(gemini.clone()));

        let resp = generate_strategic_report(&llm, None, &request()).await;
        assert_eq!(resp.strategic_insight, "Demanda cresce");
        assert_eq!(resp.forecast, "Alta");
        assert_eq!(gemini.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn missing_gemini_returns_error_text_as_insight() {
        let llm = LlmService::new(ModelDefaults::default());
        let resp = generate_strategic_report(&llm, None, &request()).await;
        assert_eq!(resp.strategic_insight, REPORT_ERROR);
        assert_eq!(resp.forecast, "Erro ao estruturar resposta");
    }
}
