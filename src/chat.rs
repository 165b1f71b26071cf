//! Chat assistant backed by an external workflow-automation webhook.
//!
//! [`WebhookClient`] posts one question and returns the raw JSON answer.
//! [`ChatSession`] keeps the message history the way the dashboard's chat
//! panel shows it: a greeting, each question, and each answer or error.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{ChatMessage, ChatTurn, Sender, WebhookRequest};
use crate::source::build_client;

// ---------------------------------------------------------------------------
// WebhookClient
// ---------------------------------------------------------------------------

/// Posts chat questions to the webhook URL.
pub struct WebhookClient {
    url: String,
    client: Client,
}

impl WebhookClient {
    /// Create a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DashboardError::InvalidArgument(
                "webhook URL must not be empty".into(),
            ));
        }
        Ok(Self {
            url,
            client: build_client(timeout)?,
        })
    }

    /// The configured webhook URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `query` and return the webhook's answer.
    ///
    /// Non-2xx responses fail with [`DashboardError::WebhookStatus`]. A body
    /// that is not JSON fails with [`DashboardError::Json`].
    pub fn send(&self, query: &str, timestamp: DateTime<Utc>) -> Result<Value> {
        let body = WebhookRequest {
            query: query.to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let resp = self.client.post(&self.url).json(&body).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::WebhookStatus(status.as_u16()));
        }

        let text = resp.text()?;
        debug!(status = status.as_u16(), bytes = text.len(), "webhook answered");
        Ok(serde_json::from_str(&text)?)
    }
}

/// Text to show for a webhook answer.
///
/// Strings are shown as-is. Objects with an `output` key show that value.
/// Anything else is pretty-printed JSON.
pub fn extract_output_text(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("output") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => pretty(other),
            None => pretty(data),
        },
        other => pretty(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

// ---------------------------------------------------------------------------
// ChatSession
// ---------------------------------------------------------------------------

/// Ordered chat history, seeded with a greeting from the bot.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        session.push(Sender::Bot, config::CHAT_GREETING.to_string());
        session
    }

    /// All messages in the order they were added.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask the webhook a question.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the trimmed
    /// question is recorded, sent, and followed by either the answer text or
    /// an `"Error: ..."` message. Failures never escape as `Err`; they become
    /// part of the conversation.
    pub fn ask(&mut self, client: &WebhookClient, text: &str) -> Option<ChatTurn> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        let asked_at = self.push(Sender::User, query.to_string()).timestamp;

        let turn = match client.send(query, asked_at) {
            Ok(data) => {
                let data_changed = data.is_object() || data.is_array();
                let reply = self.push(Sender::Bot, extract_output_text(&data)).clone();
                ChatTurn { reply, data_changed }
            }
            Err(e) => {
                warn!(error = %e, "chat webhook request failed");
                let reply = self.push(Sender::Bot, format!("Error: {}", e)).clone();
                ChatTurn {
                    reply,
                    data_changed: false,
                }
            }
        };
        Some(turn)
    }

    fn push(&mut self, sender: Sender, text: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }
}
