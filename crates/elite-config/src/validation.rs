// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.
//!
//! Every check runs; all failures are reported together.

use crate::diagnostic::ConfigError;
use crate::model::EliteConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Which command a configuration is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// The main service: storage is required.
    Service,
    /// The status aggregator, which never opens storage.
    Status,
}

/// Validate a deserialized configuration for the main service.
pub fn validate_config(config: &EliteConfig) -> Result<(), Vec<ConfigError>> {
    validate_for(config, Profile::Service)
}

/// Validate a deserialized configuration for the given command.
pub fn validate_for(config: &EliteConfig, profile: Profile) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if profile == Profile::Service && config.storage.database_path().is_none() {
        fail(
            "storage.database_url must be set (a file path or sqlite:// URL); \
             export DATABASE_URL or add it to elite.toml"
                .to_string(),
        );
    }

    for (key, host) in [
        ("server.host", &config.server.host),
        ("status.host", &config.status.host),
    ] {
        if !is_valid_host(host) {
            fail(format!("{key} `{host}` is not a valid IP address or hostname"));
        }
    }

    for (key, port) in [
        ("server.port", config.server.port),
        ("status.port", config.status.port),
    ] {
        if port == 0 {
            fail(format!("{key} must not be zero"));
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "server.log_level `{}` must be one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let mut urls = vec![
        ("openai.base_url", config.openai.base_url.as_str()),
        ("anthropic.base_url", config.anthropic.base_url.as_str()),
        ("gemini.base_url", config.gemini.base_url.as_str()),
        ("status.waha_url", config.status.waha_url.as_str()),
        ("status.n8n_url", config.status.n8n_url.as_str()),
    ];
    if let Some(ia) = &config.status.ia_url {
        urls.push(("status.ia_url", ia.as_str()));
    }
    for (key, url) in urls {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{key} `{url}` must be an http:// or https:// URL"));
        }
    }

    for (key, secs) in [
        ("openai.timeout_secs", config.openai.timeout_secs),
        ("anthropic.timeout_secs", config.anthropic.timeout_secs),
        ("gemini.timeout_secs", config.gemini.timeout_secs),
        ("waha.download_timeout_secs", config.waha.download_timeout_secs),
        ("status.timeout_secs", config.status.timeout_secs),
    ] {
        if secs == 0 {
            fail(format!("{key} must be greater than zero"));
        }
    }

    let temperature = config.models.default_temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "models.default_temperature must be between 0.0 and 2.0, got {temperature}"
        ));
    }

    if config.models.default_max_tokens == 0 {
        fail("models.default_max_tokens must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_host(host: &str) -> bool {
    let host = host.trim();
    !host.is_empty()
        && (host.parse::<std::net::IpAddr>().is_ok()
            || host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-'))
}
