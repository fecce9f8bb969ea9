// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the storage traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use elite_config::model::StorageConfig;
use elite_core::types::{AgentConfig, IncomingMessage, Message, Ticket, TicketStatus};
use elite_core::{AgentConfigStore, EliteError, StorageAdapter};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// The database is opened lazily by [`StorageAdapter::initialize`]; every
/// other operation fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, EliteError> {
        self.db.get().ok_or_else(|| EliteError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(db: &Database) -> Result<(), EliteError> {
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl AgentConfigStore for SqliteStorage {
    async fn get_agent_config(&self, provider: &str) -> Result<Option<AgentConfig>, EliteError> {
        queries::agent_configs::get_agent_config(self.db()?, provider).await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), EliteError> {
        let path = self.config.database_path().ok_or_else(|| {
            EliteError::Config("storage.database_url is not set".to_string())
        })?;
        let db = Database::open(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| EliteError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), EliteError> {
        Self::checkpoint(self.db()?).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Tickets ---

    async fn save_message(&self, message: &IncomingMessage) -> Result<Message, EliteError> {
        queries::tickets::save_message(self.db()?, message).await
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, EliteError> {
        queries::tickets::get_ticket(self.db()?, id).await
    }

    async fn list_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, EliteError> {
        queries::tickets::list_tickets(self.db()?, status).await
    }

    async fn close_ticket(&self, id: i64) -> Result<Option<Ticket>, EliteError> {
        queries::tickets::close_ticket(self.db()?, id).await
    }

    // --- Messages ---

    async fn get_messages(&self, ticket_id: i64) -> Result<Vec<Message>, EliteError> {
        queries::messages::get_messages(self.db()?, ticket_id).await
    }

    // --- Agent configs ---

    async fn list_agent_configs(&self) -> Result<Vec<AgentConfig>, EliteError> {
        queries::agent_configs::list_agent_configs(self.db()?).await
    }

    async fn upsert_agent_config(&self, config: &AgentConfig) -> Result<(), EliteError> {
        queries::agent_configs::upsert_agent_config(self.db()?, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elite_core::types::SenderRole;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_url: Some(format!("sqlite://{}", path.display())),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn sqlite_storage_reports_its_name() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("t.db")));
        assert_eq!(storage.name(), "sqlite");
    }

    #[tokio::test]
    async fn initialize_opens_database_from_sqlite_url() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init.db");
        let storage = SqliteStorage::new(make_config(&db_path));
        storage.initialize().await.unwrap();
        assert!(db_path.exists());
        assert!(storage.list_tickets(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_without_url_is_config_error() {
        let storage = SqliteStorage::new(StorageConfig::default());
        let err = storage.initialize().await.unwrap_err();
        assert!(matches!(err, EliteError::Config(_)));
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("twice.db")));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("none.db")));
        assert!(storage.close().await.is_err());
        assert!(storage.list_tickets(None).await.is_err());
        assert!(storage.get_agent_config("openai").await.is_err());
    }

    #[tokio::test]
    async fn ticket_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("life.db")));
        storage.initialize().await.unwrap();

        let msg = storage
            .save_message(&IncomingMessage {
                phone: "5511988887777@c.us".into(),
                content: "Quero cancelar".into(),
                sender: SenderRole::Customer,
                contact_name: "João".into(),
                analysis_tag: None,
            })
            .await
            .unwrap();

        let ticket = storage.get_ticket(msg.ticket_id).await.unwrap().unwrap();
        assert_eq!(ticket.customer_phone.as_deref(), Some("5511988887777"));
        assert_eq!(storage.get_messages(ticket.id).await.unwrap().len(), 1);

        let closed = storage.close_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(
            storage
                .list_tickets(Some(TicketStatus::Open))
                .await
                .unwrap()
                .is_empty()
        );

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn agent_config_through_store_trait() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::new(make_config(&dir.path().join("cfg.db")));
        storage.initialize().await.unwrap();

        let config = AgentConfig {
            provider: "anthropic".into(),
            model: "claude-custom".into(),
            temperature: 0.2,
            max_tokens: 1024,
            system_prompt: None,
            is_active: true,
        };
        storage.upsert_agent_config(&config).await.unwrap();

        let store: &dyn AgentConfigStore = &storage;
        assert_eq!(store.get_agent_config("anthropic").await.unwrap(), Some(config));
        assert_eq!(storage.list_agent_configs().await.unwrap().len(), 1);
    }
}
