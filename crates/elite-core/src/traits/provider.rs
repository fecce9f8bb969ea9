// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM vendors (OpenAI, Anthropic, Gemini).

use async_trait::async_trait;

use crate::error::EliteError;
use crate::types::{GenerationRequest, ProviderKind};

/// Adapter for a single LLM vendor.
///
/// Each vendor turns a [`GenerationRequest`] into one API call and returns
/// the generated text. Selection between vendors and the resolution of
/// model/temperature/token parameters happen in the dispatch layer.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Human-readable name of this adapter instance, used in logs.
    fn name(&self) -> &str;

    /// Which vendor this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Whether the adapter accepts [`GenerationRequest::media`].
    fn supports_media(&self) -> bool {
        false
    }

    /// Sends a single-shot generation request and returns the response text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, EliteError>;
}
