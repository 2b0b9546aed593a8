//! Boundary contract for the site's chat assistant.
//!
//! A message plus the prior turns go in, reply text comes out. Any failure
//! (transport error, undecodable or empty reply) becomes a fixed fallback
//! line so the chat panel always has something to show. The actual HTTP
//! transport is supplied by the host through [`ChatTransport`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when the host does not pick one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Shown to the user whenever the chat service cannot produce a reply.
pub const FALLBACK_REPLY: &str =
    "I seem to be having trouble connecting to the neural network. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One prior turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// What a transport receives for one exchange.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub history: &'a [ChatTurn],
    pub message: &'a str,
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Chat transport failed: {0}")]
    Transport(String),

    #[error("Chat service returned an empty reply")]
    EmptyReply,

    #[error("Malformed chat payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends one request to a hosted chat-completion service.
pub trait ChatTransport {
    fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatError>;
}

/// A configured assistant: transport, model and system instruction.
pub struct ChatSession<T: ChatTransport> {
    transport: T,
    model: String,
    system_instruction: String,
}

impl<T: ChatTransport> ChatSession<T> {
    pub fn new(transport: T, system_instruction: impl Into<String>) -> Self {
        Self {
            transport,
            model: DEFAULT_MODEL.to_string(),
            system_instruction: system_instruction.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask for a reply. Never fails: errors are logged and replaced by
    /// [`FALLBACK_REPLY`].
    pub fn send(&self, message: &str, history: &[ChatTurn]) -> String {
        match self.try_send(message, history) {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Error communicating with chat service: {}", err);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Same as [`send`](Self::send) with history supplied as a JSON array of turns.
    pub fn send_json(&self, message: &str, history_json: &str) -> String {
        match parse_history(history_json) {
            Ok(history) => self.send(message, &history),
            Err(err) => {
                log::error!("Error communicating with chat service: {}", err);
                FALLBACK_REPLY.to_string()
            }
        }
    }

    fn try_send(&self, message: &str, history: &[ChatTurn]) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: &self.model,
            system_instruction: &self.system_instruction,
            history,
            message,
        };
        let reply = self.transport.complete(&request)?;
        if reply.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(reply)
    }
}

/// Parse a JSON array of `{ "role": "user" | "model", "text": "..." }` turns.
/// An empty string is an empty history.
pub fn parse_history(json: &str) -> Result<Vec<ChatTurn>, ChatError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}
