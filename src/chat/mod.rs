//! Chat: send a system + user prompt to a chat completion endpoint.

mod client;
mod types;

pub use client::ChatClient;
pub use types::{ChatMessage, ChatReply, ChatRequest, ContentPart, ReasoningOptions, Role};
