// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter traits for persistence backends (SQLite).

use async_trait::async_trait;

use crate::error::EliteError;
use crate::types::{AgentConfig, IncomingMessage, Message, Ticket, TicketStatus};

/// Read access to persisted per-provider configuration.
///
/// Split from [`StorageAdapter`] so the LLM dispatch layer can depend on the
/// one lookup it needs.
#[async_trait]
pub trait AgentConfigStore: Send + Sync {
    /// Returns the configuration row for `provider`, if one exists.
    async fn get_agent_config(&self, provider: &str) -> Result<Option<AgentConfig>, EliteError>;
}

/// Adapter for the relational store holding tickets, messages and agent configs.
#[async_trait]
pub trait StorageAdapter: AgentConfigStore + 'static {
    /// Human-readable name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Initializes the storage backend (open connection, run migrations).
    async fn initialize(&self) -> Result<(), EliteError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), EliteError>;

    // --- Tickets ---

    /// Persists a message against the open ticket of its phone number,
    /// creating the ticket when none is open. Runs in one transaction.
    async fn save_message(&self, message: &IncomingMessage) -> Result<Message, EliteError>;

    /// Returns a ticket by id.
    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, EliteError>;

    /// Lists tickets, newest first, optionally filtered by status.
    async fn list_tickets(&self, status: Option<TicketStatus>) -> Result<Vec<Ticket>, EliteError>;

    /// Marks a ticket closed. Returns `None` when the ticket does not exist.
    async fn close_ticket(&self, id: i64) -> Result<Option<Ticket>, EliteError>;

    // --- Messages ---

    /// Returns the messages of a ticket in chronological order.
    async fn get_messages(&self, ticket_id: i64) -> Result<Vec<Message>, EliteError>;

    // --- Agent configs ---

    /// Lists all provider configuration rows.
    async fn list_agent_configs(&self) -> Result<Vec<AgentConfig>, EliteError>;

    /// Inserts or replaces the configuration row for `config.provider`.
    async fn upsert_agent_config(&self, config: &AgentConfig) -> Result<(), EliteError>;
}
