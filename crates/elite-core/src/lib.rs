// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Elite Finder AI service.
//!
//! This crate provides the error type, the domain types (tickets, messages,
//! provider configuration) and the adapter traits implemented by the
//! provider and storage crates.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EliteError;
pub use types::{
    AgentConfig, GenerationRequest, IncomingMessage, MediaPart, Message, ProviderKind,
    SenderRole, Ticket, TicketStatus,
};

pub use traits::{AgentConfigStore, ProviderAdapter, StorageAdapter};
