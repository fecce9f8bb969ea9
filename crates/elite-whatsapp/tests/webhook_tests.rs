// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end webhook processing against SQLite and a mock WAHA file server.

use std::sync::Arc;

use elite_config::model::WahaConfig;
use elite_core::types::{ProviderKind, SenderRole};
use elite_llm::{LlmService, ModelDefaults};
use elite_test_utils::{MockProvider, StorageFixture};
use elite_whatsapp::{WahaWebhookPayload, WebhookProcessor};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    fixture: StorageFixture,
    gemini: MockProvider,
    openai: MockProvider,
    processor: WebhookProcessor,
}

async fn harness(api_key: Option<&str>) -> Harness {
    let gemini = MockProvider::with_responses(ProviderKind::Gemini, vec!["Foto de um boleto".into()]);
    harness_with(api_key, gemini).await
}

async fn harness_with(api_key: Option<&str>, gemini: MockProvider) -> Harness {
    let fixture = StorageFixture::new().await.unwrap();
    let openai = MockProvider::with_responses(ProviderKind::OpenAi, vec!["Planilha ok".into()]);
    let llm = LlmService::new(ModelDefaults::default())
        .with_provider(Arc::new(gemini.clone()))
        .with_provider(Arc::new(openai.clone()));
    let waha = WahaConfig {
        api_key: api_key.map(str::to_string),
        download_timeout_secs: 5,
    };
    let processor =
        WebhookProcessor::new(Arc::new(llm), fixture.adapter(), reqwest::Client::new(), &waha);
    Harness {
        fixture,
        gemini,
        openai,
        processor,
    }
}

fn payload(event: &str, message: Value) -> WahaWebhookPayload {
    serde_json::from_value(json!({ "event": event, "payload": message })).unwrap()
}

fn sales_workbook(data_rows: u32) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "nome").unwrap();
    sheet.write_string(0, 1, "valor").unwrap();
    for i in 1..=data_rows {
        sheet.write_string(i, 0, format!("n{i}")).unwrap();
        sheet.write_number(i, 1, f64::from(i)).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn text_message(from: &str, body: &str) -> Value {
    json!({
        "id": "msg-1",
        "from": from,
        "to": "5511000000000@c.us",
        "body": body,
        "timestamp": 1_700_000_000,
        "_data": {"notifyName": "Carla"}
    })
}

#[tokio::test]
async fn text_messages_share_one_ticket() {
    let h = harness(None).await;

    h.processor
        .process(&payload("message", text_message("5511999999999@c.us", "Oi")))
        .await;
    h.processor
        .process(&payload("message.any", text_message("5511999999999@c.us", "Preciso de ajuda")))
        .await;

    let storage = h.fixture.adapter();
    let tickets = storage.list_tickets(None).await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].customer_name, "Carla");
    assert_eq!(tickets[0].channel, "whatsapp");

    let messages = storage.get_messages(tickets[0].id).await.unwrap();
    let contents: Vec<_> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["Oi", "Preciso de ajuda"]);
    assert!(messages.iter().all(|m| m.sender == SenderRole::Customer));
}

#[tokio::test]
async fn outgoing_message_lands_on_recipient_ticket() {
    let h = harness(None).await;
    let mut msg = text_message("5511000000000@c.us", "Seu pedido saiu");
    msg["fromMe"] = json!(true);
    msg["to"] = json!("5511777777777@c.us");
    h.processor.process(&payload("message.any", msg)).await;

    let tickets = h.fixture.adapter().list_tickets(None).await.unwrap();
    assert_eq!(tickets[0].customer_phone.as_deref(), Some("5511777777777"));
    let messages = h.fixture.adapter().get_messages(tickets[0].id).await.unwrap();
    assert_eq!(messages[0].sender, SenderRole::Agent);
}

#[tokio::test]
async fn non_message_events_and_empty_bodies_are_ignored() {
    let h = harness(None).await;
    h.processor
        .process(&payload("session.status", text_message("5511@c.us", "Oi")))
        .await;
    h.processor
        .process(&payload("message", text_message("5511@c.us", "   ")))
        .await;
    assert!(h.fixture.adapter().list_tickets(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn image_is_downloaded_analyzed_and_tagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/photo.jpg"))
        .and(header("X-Api-Key", "waha-key"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(Some("waha-key")).await;
    h.processor
        .process(&payload(
            "message",
            json!({
                "id": "img-1",
                "from": "5511999999999@c.us",
                "to": "5511000000000@c.us",
                "hasMedia": true,
                "type": "image",
                "timestamp": 1,
                "media": {
                    "url": format!("{}/api/files/photo.jpg", server.uri()),
                    "mimetype": "image/jpeg"
                }
            }),
        ))
        .await;

    let request = h.gemini.last_request().await.unwrap();
    assert_eq!(request.model, "gemini-3.0-flash");
    assert!(request.prompt.starts_with("Descreva esta imagem"));
    assert_eq!(request.media.unwrap().data, vec![0xFF, 0xD8, 0xFF]);

    let storage = h.fixture.adapter();
    let tickets = storage.list_tickets(None).await.unwrap();
    let messages = storage.get_messages(tickets[0].id).await.unwrap();
    assert_eq!(messages[0].content, "Foto de um boleto");
    assert_eq!(messages[0].analysis_tag.as_deref(), Some("image"));
    assert_eq!(tickets[0].customer_name, "5511999999999");
}

#[tokio::test]
async fn failed_download_stops_processing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(None).await;
    h.processor
        .process(&payload(
            "message",
            json!({
                "id": "aud-1",
                "from": "5511@c.us",
                "to": "5522@c.us",
                "type": "ptt",
                "timestamp": 1,
                "media": {"url": format!("{}/voice.ogg", server.uri()), "mimetype": "audio/ogg"}
            }),
        ))
        .await;

    assert!(h.gemini.requests().await.is_empty());
    assert!(h.fixture.adapter().list_tickets(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn media_without_url_or_with_unknown_type_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 4]))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(None).await;
    for media in [
        json!({"mimetype": "image/png"}),
        json!({"url": format!("{}/clip.mp4", server.uri()), "mimetype": "video/mp4"}),
    ] {
        h.processor
            .process(&payload(
                "message",
                json!({
                    "id": "m", "from": "5511@c.us", "to": "5522@c.us",
                    "hasMedia": true, "timestamp": 1, "media": media
                }),
            ))
            .await;
    }

    assert!(h.gemini.requests().await.is_empty());
    assert!(h.openai.requests().await.is_empty());
}

#[tokio::test]
async fn unreadable_spreadsheet_is_not_sent_to_openai() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not really xlsx".to_vec()))
        .mount(&server)
        .await;

    let h = harness(None).await;
    h.processor
        .process(&payload(
            "message",
            json!({
                "id": "doc-1", "from": "5511@c.us", "to": "5522@c.us",
                "type": "document", "timestamp": 1,
                "media": {
                    "url": format!("{}/report.xlsx", server.uri()),
                    "mimetype": "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                }
            }),
        ))
        .await;

    assert!(h.openai.requests().await.is_empty());
    assert!(h.fixture.adapter().list_tickets(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn spreadsheet_is_summarized_by_openai_and_tagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/vendas.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(sales_workbook(80)))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(None).await;
    h.processor
        .process(&payload(
            "message",
            json!({
                "id": "doc-2", "from": "5511999999999@c.us", "to": "5511000000000@c.us",
                "type": "document", "hasMedia": true, "timestamp": 1,
                "media": {
                    "url": format!("{}/api/files/vendas.xlsx", server.uri()),
                    "mimetype": "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                }
            }),
        ))
        .await;

    assert!(h.gemini.requests().await.is_empty());
    let request = h.openai.last_request().await.unwrap();
    assert!(request.media.is_none());
    assert!(request.prompt.contains("nome,valor\nn1,1\n"));
    assert!(request.prompt.contains("n50,50\n"));
    assert!(!request.prompt.contains("n51,51"));

    let storage = h.fixture.adapter();
    let tickets = storage.list_tickets(None).await.unwrap();
    let messages = storage.get_messages(tickets[0].id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Planilha ok");
    assert_eq!(messages[0].analysis_tag.as_deref(), Some("spreadsheet"));
}

#[tokio::test]
async fn failed_media_analysis_keeps_caption_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]))
        .mount(&server)
        .await;

    let gemini = MockProvider::failing(ProviderKind::Gemini, "quota exceeded");
    let h = harness_with(None, gemini).await;
    h.processor
        .process(&payload(
            "message",
            json!({
                "id": "pdf-1", "from": "5511999999999@c.us", "to": "5511000000000@c.us",
                "type": "document", "hasMedia": true, "timestamp": 1,
                "body": "Segue o comprovante",
                "media": {"url": format!("{}/nota.pdf", server.uri()), "mimetype": "application/pdf"}
            }),
        ))
        .await;

    assert_eq!(h.gemini.requests().await.len(), 1);
    let storage = h.fixture.adapter();
    let tickets = storage.list_tickets(None).await.unwrap();
    let messages = storage.get_messages(tickets[0].id).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Segue o comprovante");
    assert!(messages[0].analysis_tag.is_none());
}
