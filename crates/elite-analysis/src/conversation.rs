// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quality audit of a single conversation.

use elite_core::AgentConfigStore;
use elite_llm::LlmService;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::parse::{lenient_i64, parse_object};
use crate::types::{AnalysisRequest, AnalysisResponse, ConversationMessage};

const DEFAULT_CONTEXT: &str = "Atendimento ao cliente";

/// Model verdict as requested by the auditor prompt; absent keys take defaults.
#[derive(Debug, Deserialize)]
struct Verdict {
    #[serde(default, deserialize_with = "lenient_i64")]
    score: i64,
    #[serde(default = "neutral")]
    sentiment: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    suggestion: Option<String>,
    #[serde(default = "low_risk")]
    risk_level: String,
}

fn neutral() -> String {
    "Neutro".to_string()
}

fn low_risk() -> String {
    "Baixo".to_string()
}

/// One `"{role}: {content}"` line per message.
pub fn build_transcript(messages: &[ConversationMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}\n", m.role, m.content))
        .collect()
}

pub fn build_prompt(request: &AnalysisRequest) -> String {
    let context = request
        .context
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CONTEXT);
    let transcript = build_transcript(&request.messages);

    format!(
        r#"Você é um Auditor de Qualidade Sênior. Analise a seguinte conversa.

CONTEXTO: {context}

TRANSCRICAO:
{transcript}

Sua tarefa é extrair insights profundos.
Responda EXCLUSIVAMENTE em JSON no seguinte formato:
{{
    "score": <0-100>,
    "sentiment": "<Muito Positivo|Positivo|Neutro|Negativo|Muito Negativo>",
    "summary": "<Resumo executivo do que ocorreu>",
    "strengths": ["<Ponto 1>", "<Ponto 2>"],
    "weaknesses": ["<Ponto 1>", "<Ponto 2>"],
    "suggestion": "<Sugestão tática imediata>",
    "risk_level": "<Baixo|Alto>"
}}
"#
    )
}

/// Interpret raw model output for `conversation_id`.
pub fn parse_analysis(conversation_id: &str, raw: &str) -> AnalysisResponse {
    match parse_object::<Verdict>(raw) {
        Ok(v) => AnalysisResponse {
            conversation_id: conversation_id.to_string(),
            score: v.score,
            sentiment: v.sentiment,
            summary: v.summary,
            strengths: v.strengths,
            weaknesses: v.weaknesses,
            suggestion: v.suggestion,
            risk_level: v.risk_level,
        },
        Err(e) => {
            warn!(conversation_id, error = %e, "could not parse analysis output");
            AnalysisResponse::failed(conversation_id)
        }
    }
}

/// Audit a conversation with the requested provider.
///
/// Provider failures come back from [`LlmService`] as plain text, which then
/// fails to parse, so every failure ends in [`AnalysisResponse::failed`].
pub async fn analyze_conversation(
    llm: &LlmService,
    store: Option<&dyn AgentConfigStore>,
    request: &AnalysisRequest,
) -> AnalysisResponse {
    let provider = request.provider_name();
    debug!(
        conversation_id = %request.conversation_id,
        provider,
        messages = request.messages.len(),
        "analyzing conversation"
    );

    let prompt = build_prompt(request);
    let raw = llm.analyze_conversation(store, &prompt, provider).await;
    parse_analysis(&request.conversation_id, &raw)
}
