// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Elite Finder AI service, built on axum.
//!
//! Routes:
//! - `GET /health` - liveness probe
//! - `POST /analyze`, `POST /report` - LLM analysis (API key required)
//! - `POST /webhooks/waha` - WAHA webhook intake, processed in the background
//! - `/admin/config`, `/admin/tickets/...` - configuration and ticket administration

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{AppState, ServerConfig, build_router, start_server};
