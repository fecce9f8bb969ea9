// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage fixtures for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use elite_config::model::StorageConfig;
use elite_core::types::AgentConfig;
use elite_core::{AgentConfigStore, EliteError, StorageAdapter};
use elite_storage::SqliteStorage;

/// An initialized [`SqliteStorage`] backed by a temporary directory.
///
/// The directory (and database) is removed when the fixture is dropped.
pub struct StorageFixture {
    pub storage: Arc<SqliteStorage>,
    _dir: tempfile::TempDir,
}

impl StorageFixture {
    pub async fn new() -> Result<Self, EliteError> {
        let dir = tempfile::TempDir::new().map_err(|e| EliteError::Storage { source: e.into() })?;
        let config = StorageConfig {
            database_url: Some(dir.path().join("test.db").to_string_lossy().into_owned()),
            wal_mode: true,
        };
        let storage = SqliteStorage::new(config);
        storage.initialize().await?;
        Ok(Self {
            storage: Arc::new(storage),
            _dir: dir,
        })
    }

    /// The storage as a trait object, the way the HTTP layer holds it.
    pub fn adapter(&self) -> Arc<dyn StorageAdapter> {
        self.storage.clone()
    }
}

/// In-memory [`AgentConfigStore`], optionally failing every lookup.
#[derive(Default)]
pub struct MockConfigStore {
    configs: RwLock<HashMap<String, AgentConfig>>,
    fail: bool,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose lookups always return a storage error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn insert(&self, config: AgentConfig) {
        self.configs
            .write()
            .await
            .insert(config.provider.clone(), config);
    }
}

#[async_trait]
impl AgentConfigStore for MockConfigStore {
    async fn get_agent_config(&self, provider: &str) -> Result<Option<AgentConfig>, EliteError> {
        if self.fail {
            return Err(EliteError::Storage {
                source: "mock config store unavailable".into(),
            });
        }
        Ok(self.configs.read().await.get(provider).cloned())
    }
}
