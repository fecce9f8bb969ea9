// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Elite Finder AI service.
//!
//! TOML files in the XDG hierarchy, environment overrides, strict key
//! checking (`deny_unknown_fields`) and miette diagnostics with typo
//! suggestions.
//!
//! ```no_run
//! use elite_config::{load_and_validate, render_errors};
//!
//! match load_and_validate() {
//!     Ok(config) => println!("listening on port {}", config.server.port),
//!     Err(errors) => render_errors(&errors),
//! }
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::EliteConfig;
pub use validation::Profile;

/// Load from the full hierarchy and validate.
pub fn load_and_validate() -> Result<EliteConfig, Vec<ConfigError>> {
    load_and_validate_for(None, Profile::Service)
}

/// Load from `path` (or the full hierarchy when `None`) and validate for `profile`.
pub fn load_and_validate_for(
    path: Option<&Path>,
    profile: Profile,
) -> Result<EliteConfig, Vec<ConfigError>> {
    let result = match path {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };
    match result {
        Ok(config) => {
            validation::validate_for(&config, profile)?;
            Ok(config)
        }
        Err(err) => {
            let sources = match path {
                Some(path) => std::fs::read_to_string(path)
                    .map(|content| vec![(path.display().to_string(), content)])
                    .unwrap_or_default(),
                None => collect_toml_sources(),
            };
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load from a TOML string over defaults and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<EliteConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = [("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load from an explicit file (plus environment overrides) and validate.
pub fn load_and_validate_path(path: &Path) -> Result<EliteConfig, Vec<ConfigError>> {
    load_and_validate_for(Some(path), Profile::Service)
}

/// Contents of every config file that exists, keyed by the path Figment reports.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_file_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let shown = if path.is_relative() {
                std::env::current_dir()
                    .map(|dir| dir.join(&path))
                    .unwrap_or(path)
            } else {
                path
            };
            Some((shown.display().to_string(), content))
        })
        .collect()
}
