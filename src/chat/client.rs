//! Chat completion client.

use super::types::{ChatReply, ChatRequest};
use crate::config::{ChatSettings, Credential};
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};

/// Client for an OpenRouter-style chat completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    transport: HttpTransport,
    url: Credential,
    api_key: Credential,
    model: String,
    system_prompt: String,
    reasoning_enabled: bool,
}

impl ChatClient {
    pub fn new(settings: &ChatSettings) -> Result<Self> {
        if settings.system_prompt.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "system prompt must not be empty",
                ErrorContext::new().with_source("chat"),
            ));
        }
        Ok(Self {
            transport: HttpTransport::new(settings.timeout)?,
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            system_prompt: settings.system_prompt.clone(),
            reasoning_enabled: settings.reasoning_enabled,
        })
    }

    /// Sends the prompt and returns the first choice's message.
    pub async fn get_reply(&self, user_prompt: &str) -> Result<ChatReply> {
        let completion = self.get_completion(user_prompt).await?;
        ChatReply::from_completion(&completion)
    }

    /// Sends the prompt and returns the decoded completion body unchanged.
    pub async fn get_completion(&self, user_prompt: &str) -> Result<serde_json::Value> {
        let body = self.build_request(user_prompt);
        let request = self
            .transport
            .post_json(self.url.expose(), self.api_key.expose(), &body);
        let text = self.transport.execute(request, "chat").await?;

        serde_json::from_str(&text).map_err(|e| {
            Error::api_service(
                None,
                "response body is not valid JSON",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("chat"),
            )
        })
    }

    pub fn build_request(&self, user_prompt: &str) -> ChatRequest {
        ChatRequest::new(&self.model, &self.system_prompt, user_prompt)
            .with_reasoning(self.reasoning_enabled)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_system_prompt_is_rejected() {
        let settings = ChatSettings::new("https://openrouter.example/api", "k", "  \n");
        assert!(matches!(
            ChatClient::new(&settings),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_build_request_uses_settings() {
        let settings = ChatSettings::new(
            "https://openrouter.example/api",
            "k",
            "You recommend books.",
        )
        .with_model("some/model")
        .with_reasoning(false);
        let client = ChatClient::new(&settings).unwrap();
        let request = client.build_request("something Chinese");
        assert_eq!(client.model(), "some/model");
        assert_eq!(request.model, "some/model");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.system_prompt().as_deref(), Some("You recommend books."));
        assert_eq!(request.user_prompt().as_deref(), Some("something Chinese"));
        assert!(!request.reasoning.enabled);
    }
}
