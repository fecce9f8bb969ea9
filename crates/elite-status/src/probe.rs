// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP reachability probes.

use std::time::{Duration, Instant};

use elite_config::model::StatusConfig;
use serde::Serialize;
use tracing::debug;

/// Outcome of one probe.
///
/// `latency_ms` is `None` only when no HTTP response arrived at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub online: bool,
    pub latency_ms: Option<u64>,
}

impl ProbeResult {
    pub fn unreachable() -> Self {
        Self {
            online: false,
            latency_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub waha: ProbeResult,
    pub n8n: ProbeResult,
    pub ia: ProbeResult,
}

fn rounded_ms(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

pub struct StatusProber {
    client: reqwest::Client,
    waha_url: String,
    n8n_url: String,
    ia_url: Option<String>,
    timeout: Duration,
}

impl StatusProber {
    pub fn new(client: reqwest::Client, config: &StatusConfig) -> Self {
        Self {
            client,
            waha_url: config.waha_url.clone(),
            n8n_url: config.n8n_url.clone(),
            ia_url: config.ia_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// GET `url`; online iff the response is HTTP 200.
    pub async fn probe(&self, name: &str, url: &str) -> ProbeResult {
        let start = Instant::now();
        match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => {
                let result = ProbeResult {
                    online: response.status() == reqwest::StatusCode::OK,
                    latency_ms: Some(rounded_ms(start.elapsed())),
                };
                debug!(name, status = %response.status(), ?result, "probe answered");
                result
            }
            Err(e) => {
                debug!(name, error = %e, "probe failed");
                ProbeResult::unreachable()
            }
        }
    }

    /// The AI service itself: probed over HTTP when `ia_url` is set,
    /// otherwise reported online from inside the process.
    async fn probe_ia(&self) -> ProbeResult {
        match &self.ia_url {
            Some(url) => self.probe("ia", url).await,
            None => {
                let start = Instant::now();
                tokio::task::yield_now().await;
                ProbeResult {
                    online: true,
                    latency_ms: Some(rounded_ms(start.elapsed())),
                }
            }
        }
    }

    pub async fn report(&self) -> StatusReport {
        let (waha, n8n, ia) = tokio::join!(
            self.probe("waha", &self.waha_url),
            self.probe("n8n", &self.n8n_url),
            self.probe_ia(),
        );
        StatusReport { waha, n8n, ia }
    }
}
