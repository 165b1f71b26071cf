//! Chat tests: webhook request shape, answer extraction, error messages and
//! session bookkeeping.

mod common;

use std::time::Duration;

use chrono::{DateTime, Utc};
use sheet_metrics::models::Sender;
use sheet_metrics::{ChatSession, Dashboard, DashboardError, WebhookClient};

const TIMEOUT: Duration = Duration::from_secs(5);

#[test]
fn send_posts_query_and_timestamp() {
    let server = common::serve_once(200, "application/json", r#"{"output":"Alice leads"}"#);
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();

    let answer = client.send("Who leads?", Utc::now()).unwrap();
    assert_eq!(answer["output"], "Alice leads");

    let request = server.request();
    assert!(request.request_line.starts_with("POST /hook"));
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["query"], "Who leads?");
    let ts = body["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert!(DateTime::parse_from_rfc3339(ts).is_ok());
}

#[test]
fn send_rejects_non_json_body() {
    let server = common::serve_once(200, "text/plain", "just text");
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    assert!(matches!(
        client.send("q", Utc::now()),
        Err(DashboardError::Json(_))
    ));
    server.request();
}

#[test]
fn send_reports_error_status() {
    let server = common::serve_once(500, "text/plain", "boom");
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    assert!(matches!(
        client.send("q", Utc::now()),
        Err(DashboardError::WebhookStatus(500))
    ));
    server.request();
}

#[test]
fn ask_records_question_and_answer() {
    let server = common::serve_once(200, "application/json", r#"{"output":"3 clients"}"#);
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();

    let turn = session.ask(&client, "  how many clients?  ").unwrap();
    assert_eq!(turn.reply.text, "3 clients");
    assert_eq!(turn.reply.sender, Sender::Bot);
    assert!(turn.data_changed);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "how many clients?");
    assert_eq!(messages[2], turn.reply);

    let ids: Vec<u64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let body: serde_json::Value = serde_json::from_str(&server.request().body).unwrap();
    assert_eq!(body["query"], "how many clients?");
}

#[test]
fn ask_string_answer_does_not_signal_reload() {
    let server = common::serve_once(200, "application/json", r#""no changes""#);
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();

    let turn = session.ask(&client, "hello").unwrap();
    assert_eq!(turn.reply.text, "no changes");
    assert!(!turn.data_changed);
    server.request();
}

#[test]
fn ask_array_answer_signals_reload() {
    let server = common::serve_once(200, "application/json", r#"[{"row":3}]"#);
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();

    let turn = session.ask(&client, "show updated rows").unwrap();
    assert!(turn.data_changed);
    assert_eq!(turn.reply.text, "[\n  {\n    \"row\": 3\n  }\n]");
    server.request();
}

#[test]
fn ask_html_answer_becomes_error_message() {
    let server = common::serve_once(200, "text/html", "<html>oops</html>");
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();

    let turn = session.ask(&client, "hello").unwrap();
    assert!(turn.reply.text.starts_with("Error: JSON error:"));
    assert_eq!(turn.reply.sender, Sender::Bot);
    assert!(!turn.data_changed);
    assert_eq!(session.messages().len(), 3);
    server.request();
}

#[test]
fn ask_turns_failures_into_error_messages() {
    let server = common::serve_once(500, "text/plain", "boom");
    let client = WebhookClient::new(server.url.clone(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();

    let turn = session.ask(&client, "hello").unwrap();
    assert_eq!(turn.reply.text, "Error: Webhook error: 500");
    assert!(!turn.data_changed);
    assert_eq!(session.messages().len(), 3);
    server.request();
}

#[test]
fn ask_ignores_blank_input() {
    let client = WebhookClient::new(common::refused_url(), TIMEOUT).unwrap();
    let mut session = ChatSession::new();
    assert!(session.ask(&client, "   ").is_none());
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn dashboard_without_webhook_cannot_chat() {
    let dashboard = Dashboard::builder().csv_text("h").build().unwrap();
    let mut session = ChatSession::new();
    assert!(matches!(
        dashboard.ask(&mut session, "hi"),
        Err(DashboardError::NotConfigured(_))
    ));
    assert_eq!(session.messages().len(), 1);
}

// ---------------------------------------------------------------------------
// Loopback server fixture
// ---------------------------------------------------------------------------

#[test]
fn loopback_server_reads_chunked_bodies() {
    let server = common::serve_once(200, "application/json", r#"{"output":"ok"}"#);

    // A reader of unknown length makes reqwest stream the body chunked.
    let payload = std::io::Cursor::new(br#"{"query":"streamed"}"#.to_vec());
    let resp = reqwest::blocking::Client::new()
        .post(&server.url)
        .body(reqwest::blocking::Body::new(payload))
        .send()
        .unwrap();
    assert!(resp.status().is_success());

    let request = server.request();
    assert_eq!(request.header("transfer-encoding"), Some("chunked"));
    assert_eq!(request.body, r#"{"query":"streamed"}"#);
}
