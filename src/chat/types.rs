//! Chat completion request and reply types.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Content block; only text is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Vec<ContentPart>,
}

impl ChatMessage {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    /// Concatenated text of all content blocks.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => text.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningOptions {
    pub enabled: bool,
}

/// Outbound request body: a system and a user message, model id and reasoning flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub reasoning: ReasoningOptions,
}

impl ChatRequest {
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage::text(Role::System, system_prompt),
                ChatMessage::text(Role::User, user_prompt),
            ],
            reasoning: ReasoningOptions { enabled: true },
        }
    }

    pub fn with_reasoning(mut self, enabled: bool) -> Self {
        self.reasoning.enabled = enabled;
        self
    }

    pub fn system_prompt(&self) -> Option<String> {
        self.first_text(Role::System)
    }

    pub fn user_prompt(&self) -> Option<String> {
        self.first_text(Role::User)
    }

    fn first_text(&self, role: Role) -> Option<String> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(ChatMessage::joined_text)
    }
}

/// `choices[0].message` of a completion, kept verbatim.
///
/// `content` is left as raw JSON because providers send a string, `null`
/// or content blocks; every other field (e.g. `reasoning`) lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub role: String,
    #[serde(default)]
    pub content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatReply {
    /// Extracts the first choice's message from a decoded completion body.
    pub fn from_completion(completion: &Value) -> Result<Self> {
        let message = completion
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| {
                Error::api_service(
                    None,
                    "completion has no reply message",
                    ErrorContext::new()
                        .with_field_path("choices[0].message")
                        .with_source("chat"),
                )
            })?;

        serde_json::from_value(message.clone()).map_err(|e| {
            Error::api_service(
                None,
                "reply message has an unexpected shape",
                ErrorContext::new()
                    .with_field_path("choices[0].message")
                    .with_details(e.to_string())
                    .with_source("chat"),
            )
        })
    }

    /// The content when the provider sent plain text.
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.extra.get("reasoning").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = ChatRequest::new("arcee-ai/trinity-mini:free", "Be brief.", "Hi");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "arcee-ai/trinity-mini:free",
                "messages": [
                    {"role": "system", "content": [{"type": "text", "text": "Be brief."}]},
                    {"role": "user", "content": [{"type": "text", "text": "Hi"}]}
                ],
                "reasoning": {"enabled": true}
            })
        );
    }

    #[test]
    fn test_request_accessors() {
        let request = ChatRequest::new("m", "sys", "").with_reasoning(false);
        assert_eq!(request.system_prompt().as_deref(), Some("sys"));
        assert_eq!(request.user_prompt().as_deref(), Some(""));
        assert!(!request.reasoning.enabled);
    }

    #[test]
    fn test_reply_keeps_extra_fields() {
        let completion = json!({
            "id": "gen-1",
            "choices": [{
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": "Try Dune.", "reasoning": "user likes sci-fi", "refusal": null}
            }]
        });
        let reply = ChatReply::from_completion(&completion).unwrap();
        assert_eq!(reply.role, "assistant");
        assert_eq!(reply.text(), Some("Try Dune."));
        assert_eq!(reply.reasoning(), Some("user likes sci-fi"));
        assert!(reply.extra.contains_key("refusal"));
    }

    #[test]
    fn test_empty_choices_is_service_error() {
        let err = ChatReply::from_completion(&json!({"choices": []})).unwrap_err();
        assert!(matches!(err, Error::ApiService { status: None, .. }));
    }

    #[test]
    fn test_message_without_role_is_service_error() {
        let err = ChatReply::from_completion(&json!({"choices": [{"message": {"content": "x"}}]}))
            .unwrap_err();
        assert!(matches!(err, Error::ApiService { .. }));
    }
}
