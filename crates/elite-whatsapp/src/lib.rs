// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp ingestion through the WAHA gateway.
//!
//! Parses WAHA webhook payloads, persists text messages against the
//! sender's ticket, and routes media (images, audio, PDFs, spreadsheets)
//! to the LLM layer for description, transcription or summary.

pub mod media;
pub mod message_service;
pub mod processor;
pub mod types;

pub use media::MediaKind;
pub use message_service::MessageService;
pub use processor::WebhookProcessor;
pub use types::{WahaContact, WahaMedia, WahaMessage, WahaWebhookPayload};
