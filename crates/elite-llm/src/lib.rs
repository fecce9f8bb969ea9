// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider dispatch for conversation analysis, reports and media understanding.
//!
//! [`LlmService`] owns one adapter per configured vendor and resolves the
//! effective model parameters for each call from persisted [`AgentConfig`]
//! rows, falling back to [`ModelDefaults`]. Its operations never fail: vendor
//! errors come back as user-facing Portuguese strings.

pub mod defaults;
pub mod service;

pub use defaults::ModelDefaults;
pub use service::{
    ANALYSIS_ERROR_PREFIX, LlmService, MEDIA_ERROR_PREFIX, NO_PROVIDER_CONFIGURED, REPORT_ERROR,
    is_failure_text,
};
