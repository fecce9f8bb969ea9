// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Sources, lowest precedence first: compiled defaults,
//! `/etc/elite/elite.toml`, `~/.config/elite/elite.toml`, `./elite.toml`,
//! the unprefixed deployment variables (`DATABASE_URL`, `OPENAI_API_KEY`, ...)
//! and finally `ELITE_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EliteConfig;

/// Config sections addressable through `ELITE_<SECTION>_<KEY>` variables.
const SECTIONS: &[&str] = &[
    "server", "security", "storage", "openai", "anthropic", "gemini", "models", "waha", "status",
];

/// Deployment variables read without the `ELITE_` prefix, and the key each one sets.
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("DATABASE_URL", "storage.database_url"),
    ("OPENAI_API_KEY", "openai.api_key"),
    ("ANTHROPIC_API_KEY", "anthropic.api_key"),
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("INTERNAL_API_KEY", "security.internal_api_key"),
    ("WAHA_API_KEY", "waha.api_key"),
];

/// Paths of the TOML files consulted by [`load_config`], lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/elite/elite.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("elite/elite.toml"));
    }
    paths.push(PathBuf::from("elite.toml"));
    paths
}

/// Build the full Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(EliteConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(well_known_env()).merge(env_provider())
}

/// Load configuration from every source in the hierarchy.
pub fn load_config() -> Result<EliteConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over compiled defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<EliteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EliteConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file, still honoring environment overrides.
pub fn load_config_from_path(path: &Path) -> Result<EliteConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EliteConfig::default()))
        .merge(Toml::file(path))
        .merge(well_known_env())
        .merge(env_provider())
        .extract()
}

/// `ELITE_*` variables, mapped by splitting off the section name only.
///
/// `ELITE_STATUS_WAHA_URL` becomes `status.waha_url`, never `status.waha.url`.
fn env_provider() -> Env {
    Env::prefixed("ELITE_").map(|key| {
        let key = key.as_str();
        let mapped = SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or_else(|| key.to_string());
        mapped.into()
    })
}

/// Unprefixed deployment variables such as `DATABASE_URL`.
fn well_known_env() -> Env {
    let names: Vec<&str> = WELL_KNOWN_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        let key = key.as_str();
        WELL_KNOWN_ENV
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, target)| (*target).to_string())
            .unwrap_or_else(|| key.to_string())
            .into()
    })
}
