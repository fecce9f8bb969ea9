// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `elite serve` command implementation.
//!
//! Opens SQLite storage, registers every LLM provider that has credentials,
//! and serves the HTTP API until a shutdown signal arrives.

use std::fmt::Write as _;
use std::sync::Arc;

use elite_anthropic::AnthropicProvider;
use elite_config::EliteConfig;
use elite_core::{EliteError, StorageAdapter};
use elite_gateway::{AppState, AuthConfig, ServerConfig, start_server};
use elite_gemini::GeminiProvider;
use elite_llm::{LlmService, ModelDefaults};
use elite_openai::OpenAiProvider;
use elite_storage::SqliteStorage;
use elite_whatsapp::WebhookProcessor;
use tracing::{info, warn};

use crate::shutdown;

fn has_key(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.trim().is_empty())
}

/// Build the dispatch service, registering only providers with an API key.
pub fn build_llm_service(config: &EliteConfig) -> Result<LlmService, EliteError> {
    let mut llm = LlmService::new(ModelDefaults::from_config(&config.models));

    if has_key(&config.openai.api_key) {
        llm.register(Arc::new(OpenAiProvider::new(&config.openai)?));
    }
    if has_key(&config.anthropic.api_key) {
        llm.register(Arc::new(AnthropicProvider::new(&config.anthropic)?));
    }
    if has_key(&config.gemini.api_key) {
        llm.register(Arc::new(GeminiProvider::new(&config.gemini)?));
    }

    if llm.registered().is_empty() {
        warn!("no LLM provider has an API key; analysis endpoints will return fallback responses");
    }
    Ok(llm)
}

/// Human-readable summary printed by `elite check-config`.
pub fn config_summary(config: &EliteConfig) -> String {
    let yes_no = |key: &Option<String>| if has_key(key) { "configured" } else { "missing" };
    let mut out = String::new();
    let _ = writeln!(out, "configuration OK");
    let _ = writeln!(out, "  server:     {}:{}", config.server.host, config.server.port);
    let _ = writeln!(out, "  status:     {}:{}", config.status.host, config.status.port);
    let _ = writeln!(
        out,
        "  database:   {}",
        config.storage.database_path().unwrap_or_default()
    );
    let _ = writeln!(out, "  api key:    {}", yes_no(&config.security.internal_api_key));
    let _ = writeln!(out, "  openai:     {}", yes_no(&config.openai.api_key));
    let _ = writeln!(out, "  anthropic:  {}", yes_no(&config.anthropic.api_key));
    let _ = writeln!(out, "  gemini:     {}", yes_no(&config.gemini.api_key));
    out
}

/// Runs the `elite serve` command.
pub async fn run_serve(config: EliteConfig) -> Result<(), EliteError> {
    init_tracing(&config.server.log_level);

    info!(project = %config.server.project_name, "starting elite serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    let storage: Arc<dyn StorageAdapter> = storage;
    info!(backend = storage.name(), "storage initialized");

    let llm = Arc::new(build_llm_service(&config)?);
    info!(providers = ?llm.registered(), "LLM providers registered");

    let http = reqwest::Client::builder()
        .build()
        .map_err(|e| EliteError::Internal(format!("failed to create HTTP client: {e}")))?;
    let webhooks = Arc::new(WebhookProcessor::new(
        llm.clone(),
        storage.clone(),
        http,
        &config.waha,
    ));

    if !has_key(&config.security.internal_api_key) {
        warn!("security.internal_api_key is not set; /analyze and /report will reject every request");
    }

    let state = AppState {
        llm,
        storage: storage.clone(),
        webhooks,
        auth: AuthConfig {
            api_key: config.security.internal_api_key.clone(),
        },
    };
    let server = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server, state, shutdown::signal()).await?;

    storage.close().await?;
    info!("elite serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` takes precedence over `log_level`.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "elite={log_level},elite_gateway={log_level},elite_whatsapp={log_level},\
             elite_llm={log_level},elite_analysis={log_level},elite_storage={log_level},\
             elite_status={log_level},tower_http={log_level},warn"
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
