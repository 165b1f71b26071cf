use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChatMessage — One entry in a chat session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// WebhookRequest — Body posted to the chat webhook
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub query: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

// ---------------------------------------------------------------------------
// ChatTurn — Outcome of one question
// ---------------------------------------------------------------------------

/// The bot message appended for one question, and whether the dashboard
/// should reload its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub reply: ChatMessage,
    /// True when the webhook answered with a JSON object or array.
    pub data_changed: bool,
}
