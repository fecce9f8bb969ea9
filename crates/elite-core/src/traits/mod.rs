// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Adapters use `#[async_trait]` for dynamic dispatch compatibility.

pub mod provider;
pub mod storage;

pub use provider::ProviderAdapter;
pub use storage::{AgentConfigStore, StorageAdapter};
