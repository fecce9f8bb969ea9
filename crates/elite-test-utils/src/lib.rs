// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Elite Finder integration tests.
//!
//! - [`MockProvider`] - scripted LLM provider that records every request
//! - [`MockConfigStore`] - in-memory agent configuration store
//! - [`StorageFixture`] - SQLite storage in a temporary directory

pub mod harness;
pub mod mock_provider;

pub use harness::{MockConfigStore, StorageFixture};
pub use mock_provider::MockProvider;
