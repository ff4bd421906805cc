//! Transcript data model
//!
//! Messages are role-tagged turns rendered in the order supplied. The
//! derived exports build message sequences from query/response pairs.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a message turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(alias = "user")]
    User,
    #[serde(alias = "bot")]
    Bot,
    #[serde(alias = "assistant")]
    Assistant,
    #[serde(alias = "system")]
    System,
}

impl Role {
    /// Label printed on the role line
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Bot => "Bot",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }

    /// Whether this role is drawn with the user color
    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One turn in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    /// Message body; `\n` separates paragraphs
    #[serde(default)]
    pub text: String,
    /// Display string shown next to the role label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Message {
    /// Create a message without a timestamp
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Text of the role line, e.g. `User:` or `User: (3:45 PM)`
    pub fn role_line(&self) -> String {
        match &self.timestamp {
            Some(ts) => format!("{}: ({})", self.role.label(), ts),
            None => format!("{}:", self.role.label()),
        }
    }
}

/// A query/response pair exported by the multi-conversation export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub query: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Conversation {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// The User and Bot messages of this pair
    pub fn messages(&self) -> [Message; 2] {
        let mut query = Message::user(self.query.clone());
        let mut response = Message::bot(self.response.clone());
        query.timestamp = self.timestamp.clone();
        response.timestamp = self.timestamp.clone();
        [query, response]
    }
}

/// Synthetic System message placed between consecutive conversations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Separator {
    /// Separator line text
    pub text: String,
    /// Blank lines between the separator text and the next conversation
    pub gap_lines: usize,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            text: "--- Next Conversation ---".to_string(),
            gap_lines: 2,
        }
    }
}

impl Separator {
    /// Build the separator message
    pub fn message(&self) -> Message {
        let mut text = self.text.clone();
        text.push_str(&"\n".repeat(self.gap_lines));
        Message::system(text)
    }
}

/// Timestamp shown on a single exchange when the caller gives none
pub fn default_exchange_timestamp() -> String {
    Local::now().format("%-I:%M %p").to_string()
}

/// Messages for a single query/response exchange.
///
/// Both messages share one timestamp, defaulting to the current time.
pub fn exchange_messages(query: &str, response: &str, timestamp: Option<&str>) -> Vec<Message> {
    let timestamp = timestamp
        .map(str::to_string)
        .unwrap_or_else(default_exchange_timestamp);

    vec![
        Message::user(query).with_timestamp(timestamp.clone()),
        Message::bot(response).with_timestamp(timestamp),
    ]
}

/// Concatenate conversations, with a separator between consecutive ones
pub fn conversation_messages(conversations: &[Conversation], separator: &Separator) -> Vec<Message> {
    let mut messages = Vec::with_capacity(conversations.len() * 3);

    for (index, conversation) in conversations.iter().enumerate() {
        messages.extend(conversation.messages());
        if index + 1 < conversations.len() {
            messages.push(separator.message());
        }
    }

    messages
}
