// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message queries.

use elite_core::types::Message;
use elite_core::EliteError;
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::get_enum;

/// Messages of a ticket in the order they were sent.
pub async fn get_messages(db: &Database, ticket_id: i64) -> Result<Vec<Message>, EliteError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, ticket_id, content, sender, sent_at, analysis_tag
                 FROM messages WHERE ticket_id = ?1
                 ORDER BY sent_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![ticket_id], |row| {
                Ok(Message {
                    id: row.get(0)?,
                    ticket_id: row.get(1)?,
                    content: row.get(2)?,
                    sender: get_enum(row, 3)?,
                    sent_at: row.get(4)?,
                    analysis_tag: row.get(5)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}
