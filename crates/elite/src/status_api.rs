// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `elite status-api` command implementation.

use std::sync::Arc;

use elite_config::EliteConfig;
use elite_core::EliteError;
use elite_status::{StatusProber, start_status_server};
use tracing::info;

use crate::{serve, shutdown};

pub async fn run_status_api(config: EliteConfig) -> Result<(), EliteError> {
    serve::init_tracing(&config.server.log_level);

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| EliteError::Internal(format!("failed to create HTTP client: {e}")))?;
    let prober = Arc::new(StatusProber::new(client, &config.status));

    info!(
        waha = %config.status.waha_url,
        n8n = %config.status.n8n_url,
        ia = config.status.ia_url.as_deref().unwrap_or("local"),
        "starting status service"
    );

    start_status_server(
        &config.status.host,
        config.status.port,
        prober,
        shutdown::signal(),
    )
    .await?;

    info!("status service shutdown complete");
    Ok(())
}
