// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket queries and the message-to-ticket continuity rule.

use elite_core::types::{IncomingMessage, Message, Ticket, TicketStatus, now_timestamp};
use elite_core::EliteError;
use rusqlite::{OptionalExtension, TransactionBehavior, params};

use crate::database::{Database, map_tr_err};
use crate::queries::get_enum;

const TICKET_COLUMNS: &str = "id, started_at, ended_at, channel, customer_id, agent_id, status, \
                              customer_name, customer_phone";

/// Placeholder ids until customers and agents are real entities.
const PLACEHOLDER_CUSTOMER_ID: i64 = 1;
const PLACEHOLDER_AGENT_ID: i64 = 1;

/// Strip the WhatsApp `@c.us` suffix from a chat id.
pub fn normalize_phone(phone: &str) -> String {
    phone.replace("@c.us", "")
}

fn ticket_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        started_at: row.get(1)?,
        ended_at: row.get(2)?,
        channel: row.get(3)?,
        customer_id: row.get(4)?,
        agent_id: row.get(5)?,
        status: get_enum(row, 6)?,
        customer_name: row.get(7)?,
        customer_phone: row.get(8)?,
    })
}

/// Attach a message to the caller's open ticket, opening one if needed.
///
/// Lookup, ticket creation and insert share one `BEGIN IMMEDIATE`
/// transaction, so two concurrent first messages from the same number cannot
/// both create a ticket. Any failure rolls the whole unit back.
pub async fn save_message(db: &Database, incoming: &IncomingMessage) -> Result<Message, EliteError> {
    let phone = normalize_phone(&incoming.phone);
    let incoming = incoming.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let now = now_timestamp();

            let open_ticket: Option<i64> = tx
                .query_row(
                    "SELECT id FROM tickets
                     WHERE customer_phone = ?1 AND status != 'closed'
                     ORDER BY started_at DESC, id DESC LIMIT 1",
                    params![phone],
                    |row| row.get(0),
                )
                .optional()?;

            let ticket_id = match open_ticket {
                Some(id) => id,
                None => {
                    tx.execute(
                        "INSERT INTO tickets (started_at, channel, customer_id, agent_id, status,
                                              customer_name, customer_phone)
                         VALUES (?1, 'whatsapp', ?2, ?3, 'open', ?4, ?5)",
                        params![
                            now,
                            PLACEHOLDER_CUSTOMER_ID,
                            PLACEHOLDER_AGENT_ID,
                            incoming.contact_name,
                            phone,
                        ],
                    )?;
                    tx.last_insert_rowid()
                }
            };

            tx.execute(
                "INSERT INTO messages (ticket_id, content, sender, sent_at, analysis_tag)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    ticket_id,
                    incoming.content,
                    incoming.sender.to_string(),
                    now,
                    incoming.analysis_tag,
                ],
            )?;
            let message_id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(Message {
                id: message_id,
                ticket_id,
                content: incoming.content,
                sender: incoming.sender,
                sent_at: now,
                analysis_tag: incoming.analysis_tag,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Get a ticket by id.
pub async fn get_ticket(db: &Database, id: i64) -> Result<Option<Ticket>, EliteError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                params![id],
                ticket_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// List tickets newest first, optionally filtered by status.
pub async fn list_tickets(
    db: &Database,
    status: Option<TicketStatus>,
) -> Result<Vec<Ticket>, EliteError> {
    let status = status.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TICKET_COLUMNS} FROM tickets
                 WHERE (?1 IS NULL OR status = ?1)
                 ORDER BY started_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![status], ticket_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Close a ticket, stamping `ended_at`. Closing twice keeps the first stamp.
///
/// Returns `None` when no ticket has this id.
pub async fn close_ticket(db: &Database, id: i64) -> Result<Option<Ticket>, EliteError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE tickets SET status = 'closed', ended_at = ?1
                 WHERE id = ?2 AND status != 'closed'",
                params![now_timestamp(), id],
            )?;
            conn.query_row(
                &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
                params![id],
                ticket_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::messages::get_messages;
    use elite_core::types::SenderRole;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tickets.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    fn incoming(phone: &str, content: &str) -> IncomingMessage {
        IncomingMessage {
            phone: phone.to_string(),
            content: content.to_string(),
            sender: SenderRole::Customer,
            contact_name: "Maria".to_string(),
            analysis_tag: None,
        }
    }

    #[test]
    fn normalize_phone_strips_chat_suffix() {
        assert_eq!(normalize_phone("5511999990000@c.us"), "5511999990000");
        assert_eq!(normalize_phone("5511999990000"), "5511999990000");
    }

    #[tokio::test]
    async fn first_message_creates_one_ticket_and_one_message() {
        let (db, _dir) = setup_db().await;

        let msg = save_message(&db, &incoming("5511999990000@c.us", "Olá"))
            .await
            .unwrap();

        let tickets = list_tickets(&db, None).await.unwrap();
        assert_eq!(tickets.len(), 1);
        let ticket = &tickets[0];
        assert_eq!(ticket.id, msg.ticket_id);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.channel, "whatsapp");
        assert_eq!(ticket.customer_phone.as_deref(), Some("5511999990000"));
        assert_eq!(ticket.customer_name, "Maria");
        assert_eq!((ticket.customer_id, ticket.agent_id), (1, 1));

        let messages = get_messages(&db, ticket.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Olá");
        assert_eq!(messages[0].sender, SenderRole::Customer);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn subsequent_messages_reuse_open_ticket() {
        let (db, _dir) = setup_db().await;

        let first = save_message(&db, &incoming("5511@c.us", "um")).await.unwrap();
        let second = save_message(&db, &incoming("5511", "dois")).await.unwrap();

        assert_eq!(first.ticket_id, second.ticket_id);
        assert_eq!(list_tickets(&db, None).await.unwrap().len(), 1);
        assert_eq!(get_messages(&db, first.ticket_id).await.unwrap().len(), 2);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn closed_ticket_is_never_matched() {
        let (db, _dir) = setup_db().await;

        let first = save_message(&db, &incoming("5511", "um")).await.unwrap();
        let closed = close_ticket(&db, first.ticket_id).await.unwrap().unwrap();
        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(closed.ended_at.is_some());

        let second = save_message(&db, &incoming("5511", "dois")).await.unwrap();
        assert_ne!(first.ticket_id, second.ticket_id);

        let open = list_tickets(&db, Some(TicketStatus::Open)).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.ticket_id);
        let closed = list_tickets(&db, Some(TicketStatus::Closed)).await.unwrap();
        assert_eq!(closed.len(), 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn different_numbers_get_different_tickets() {
        let (db, _dir) = setup_db().await;
        let a = save_message(&db, &incoming("1111", "a")).await.unwrap();
        let b = save_message(&db, &incoming("2222", "b")).await.unwrap();
        assert_ne!(a.ticket_id, b.ticket_id);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_first_messages_share_one_ticket() {
        let (db, _dir) = setup_db().await;

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    save_message(&db, &incoming("5599", &format!("msg {i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let tickets = list_tickets(&db, None).await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(get_messages(&db, tickets[0].id).await.unwrap().len(), 8);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn close_unknown_ticket_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(close_ticket(&db, 404).await.unwrap().is_none());
        assert!(get_ticket(&db, 404).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn closing_twice_keeps_first_end_time() {
        let (db, _dir) = setup_db().await;
        let msg = save_message(&db, &incoming("5511", "x")).await.unwrap();
        let first = close_ticket(&db, msg.ticket_id).await.unwrap().unwrap();
        let second = close_ticket(&db, msg.ticket_id).await.unwrap().unwrap();
        assert_eq!(first.ended_at, second.ended_at);
        db.close().await.unwrap();
    }
}
