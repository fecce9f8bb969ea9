// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-provider model configuration rows.

use elite_core::types::{AgentConfig, now_timestamp};
use elite_core::EliteError;
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

const COLUMNS: &str = "provider, model, temperature, max_tokens, system_prompt, is_active";

fn config_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AgentConfig> {
    Ok(AgentConfig {
        provider: row.get(0)?,
        model: row.get(1)?,
        temperature: row.get(2)?,
        max_tokens: row.get(3)?,
        system_prompt: row.get(4)?,
        is_active: row.get(5)?,
    })
}

/// Configuration row for a provider, active or not.
pub async fn get_agent_config(
    db: &Database,
    provider: &str,
) -> Result<Option<AgentConfig>, EliteError> {
    let provider = provider.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {COLUMNS} FROM agent_configs WHERE provider = ?1"),
                params![provider],
                config_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// All configuration rows ordered by provider name.
pub async fn list_agent_configs(db: &Database) -> Result<Vec<AgentConfig>, EliteError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {COLUMNS} FROM agent_configs ORDER BY provider"))?;
            let rows = stmt.query_map([], config_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the row keyed by `config.provider`.
pub async fn upsert_agent_config(db: &Database, config: &AgentConfig) -> Result<(), EliteError> {
    let config = config.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO agent_configs
                     (provider, model, temperature, max_tokens, system_prompt, is_active, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (provider) DO UPDATE SET
                     model = excluded.model,
                     temperature = excluded.temperature,
                     max_tokens = excluded.max_tokens,
                     system_prompt = excluded.system_prompt,
                     is_active = excluded.is_active,
                     updated_at = excluded.updated_at",
                params![
                    config.provider,
                    config.model,
                    config.temperature,
                    config.max_tokens,
                    config.system_prompt,
                    config.is_active,
                    now_timestamp(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
