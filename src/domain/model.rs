use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One row of the deck table: a card and its three meaning texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardMeaning {
    pub name: String,
    pub upright: String,
    pub reversed: String,
    pub symbolism: String,
}

/// A card selected for one reading, with its orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub name: String,
    pub is_reversed: bool,
}

impl DrawnCard {
    pub fn orientation_label(&self) -> &'static str {
        if self.is_reversed {
            "reversed"
        } else {
            "upright"
        }
    }
}

/// Ordered outcome of one draw; names are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawResult {
    pub cards: Vec<DrawnCard>,
}

impl DrawResult {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Resolved text blocks ready for template substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInput {
    pub card_details: String,
    pub context: String,
    pub symbolism: String,
}

/// Chat role on the wire. Closed set; anything else coerces to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Map a textual role label onto the closed role set.
    ///
    /// Unrecognized labels become `User` — the documented default, so no
    /// message is ever dropped on the floor.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The two-message request produced by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
}

impl LlmRequest {
    /// Expand into the ordered message list the wire format expects.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

/// What went wrong on the backend side of a completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendFailure {
    /// Non-success HTTP status from the completion endpoint.
    Http,
    /// Transport-level failure (connect, DNS, TLS, ...).
    Transport,
    /// 2xx response whose body did not contain generated text.
    MalformedBody,
}

/// Completion outcome. Failures stay renderable: the session always has
/// something to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmResponse {
    Text(String),
    Failure { kind: BackendFailure, detail: String },
}

impl LlmResponse {
    pub fn failure(kind: BackendFailure, detail: impl Into<String>) -> Self {
        LlmResponse::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LlmResponse::Failure { .. })
    }

    /// Text to put in front of the user, failure or not.
    pub fn display_text(&self) -> String {
        match self {
            LlmResponse::Text(text) => text.clone(),
            LlmResponse::Failure { detail, .. } => format!("API call failed: {}", detail),
        }
    }
}

/// One completed reading, ready for rendering.
#[derive(Debug, Clone)]
pub struct Reading {
    pub cards: Vec<DrawnCard>,
    pub interpretation: String,
    pub generated_at: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_label_coercion_defaults_to_user() {
        assert_eq!(Role::from_label("system"), Role::System);
        assert_eq!(Role::from_label(" Assistant "), Role::Assistant);
        assert_eq!(Role::from_label("USER"), Role::User);
        assert_eq!(Role::from_label("tool"), Role::User);
        assert_eq!(Role::from_label(""), Role::User);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::system("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn request_expands_to_ordered_messages() {
        let request = LlmRequest {
            system: "sys".to_string(),
            user: "ask".to_string(),
        };
        let messages = request.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "ask");
    }

    #[test]
    fn failure_display_text_carries_marker_and_detail() {
        let response = LlmResponse::failure(BackendFailure::Http, "HTTP status 502");
        assert!(response.is_failure());
        let text = response.display_text();
        assert!(text.contains("API call failed"));
        assert!(text.contains("HTTP status 502"));
    }
}
