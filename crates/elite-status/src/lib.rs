// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status aggregation service.
//!
//! `GET /status-arquitetura` probes WAHA, n8n and the AI service
//! concurrently and reports reachability and latency for each.

pub mod probe;
pub mod server;

pub use probe::{ProbeResult, StatusProber, StatusReport};
pub use server::{build_router, start_status_server};
