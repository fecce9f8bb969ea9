// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional and defaults sensibly,
/// except `storage.database_url` which validation requires.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EliteConfig {
    /// HTTP listener and logging settings for the main service.
    #[serde(default)]
    pub server: ServerConfig,

    /// Internal API key protecting the analysis endpoints.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Database settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Static model defaults used when no persisted override exists.
    #[serde(default)]
    pub models: ModelsConfig,

    /// WAHA (WhatsApp HTTP API) integration settings.
    #[serde(default)]
    pub waha: WahaConfig,

    /// Status-aggregation service settings.
    #[serde(default)]
    pub status: StatusConfig,
}

/// HTTP listener configuration for the main service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Service name reported in logs.
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            project_name: default_project_name(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_project_name() -> String {
    "Elite Finder AI Agent".to_string()
}

/// Internal API security configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Expected value of the `X-API-Key` header. `None` rejects every
    /// protected request.
    #[serde(default)]
    pub internal_api_key: Option<String>,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Database location: a file path or a `sqlite://` URL. Required.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            wal_mode: default_wal_mode(),
        }
    }
}

impl StorageConfig {
    /// Filesystem path derived from `database_url`, with any `sqlite:` scheme removed.
    pub fn database_path(&self) -> Option<String> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        Some(path.to_string())
    }
}

fn default_wal_mode() -> bool {
    true
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` leaves the provider unregistered.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat Completions endpoint.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// API key. `None` leaves the provider unregistered.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Messages endpoint.
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,

    /// Anthropic API version header value.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_anthropic_base_url(),
            api_version: default_api_version(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` leaves the provider unregistered.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the models collection; `/{model}:generateContent` is appended.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_provider_timeout() -> u64 {
    120
}

/// Static model identifiers and sampling defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelsConfig {
    /// Conversation analysis model served by OpenAI.
    #[serde(default = "default_analysis_a")]
    pub analysis_a: String,

    /// Conversation analysis model served by Anthropic.
    #[serde(default = "default_analysis_b")]
    pub analysis_b: String,

    /// Strategic report model served by Gemini.
    #[serde(default = "default_report_model")]
    pub report: String,

    /// Media understanding model served by Gemini.
    #[serde(default = "default_media_model")]
    pub media: String,

    /// Sampling temperature when no override is persisted.
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,

    /// Output token budget when no override is persisted.
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// System prompt when no override is persisted.
    #[serde(default = "default_system_prompt")]
    pub default_system_prompt: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            analysis_a: default_analysis_a(),
            analysis_b: default_analysis_b(),
            report: default_report_model(),
            media: default_media_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            default_system_prompt: default_system_prompt(),
        }
    }
}

fn default_analysis_a() -> String {
    "gpt-5.2-mini".to_string()
}

fn default_analysis_b() -> String {
    "claude-4.5-sonnet".to_string()
}

fn default_report_model() -> String {
    "gemini-3.0-pro".to_string()
}

fn default_media_model() -> String {
    "gemini-3.0-flash".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_system_prompt() -> String {
    "You are an expert analyst.".to_string()
}

/// WAHA integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WahaConfig {
    /// Sent as `X-Api-Key` when downloading media from WAHA's file server.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout for a single media download, in seconds.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

impl Default for WahaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            download_timeout_secs: default_download_timeout(),
        }
    }
}

fn default_download_timeout() -> u64 {
    30
}

/// Status-aggregation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatusConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_status_port")]
    pub port: u16,

    /// WAHA health URL.
    #[serde(default = "default_waha_url")]
    pub waha_url: String,

    /// n8n health URL.
    #[serde(default = "default_n8n_url")]
    pub n8n_url: String,

    /// AI service health URL. `None` reports the local process instead.
    #[serde(default)]
    pub ia_url: Option<String>,

    /// Per-probe timeout in seconds.
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_status_port(),
            waha_url: default_waha_url(),
            n8n_url: default_n8n_url(),
            ia_url: None,
            timeout_secs: default_probe_timeout(),
        }
    }
}

fn default_status_port() -> u16 {
    8001
}

fn default_waha_url() -> String {
    "http://waha:3000/".to_string()
}

fn default_n8n_url() -> String {
    "http://n8n:5678/healthz".to_string()
}

fn default_probe_timeout() -> u64 {
    3
}
