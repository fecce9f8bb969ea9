// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort persistence of WhatsApp messages.

use std::sync::Arc;

use elite_core::StorageAdapter;
use elite_core::types::{IncomingMessage, Message, SenderRole};
use tracing::{error, info};

/// Saves messages against the sender's open ticket.
///
/// Failures are logged and reported as `None`; the storage layer has
/// already rolled the transaction back.
#[derive(Clone)]
pub struct MessageService {
    storage: Arc<dyn StorageAdapter>,
}

impl MessageService {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self { storage }
    }

    pub async fn save_message(
        &self,
        phone: &str,
        text: &str,
        sender: SenderRole,
        contact_name: &str,
        analysis_tag: Option<&str>,
    ) -> Option<Message> {
        let incoming = IncomingMessage {
            phone: phone.to_string(),
            content: text.to_string(),
            sender,
            contact_name: contact_name.to_string(),
            analysis_tag: analysis_tag.map(str::to_string),
        };

        match self.storage.save_message(&incoming).await {
            Ok(message) => {
                info!(
                    ticket_id = message.ticket_id,
                    message_id = message.id,
                    "message saved"
                );
                Some(message)
            }
            Err(e) => {
                error!(phone, error = %e, "failed to save message");
                None
            }
        }
    }
}
