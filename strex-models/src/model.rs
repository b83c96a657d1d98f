//! The completion model trait.
//!
//! Extraction treats the language model as an opaque callable: it gets a
//! prompt, either one string or a list of chat messages, and answers with
//! one string.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use strex_core::{ChatMessage, Role};

use crate::error::ModelError;

/// A prompt as handed to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PromptInput {
    /// A single formatted string, for completion-style models.
    Text(String),
    /// Role-tagged messages, for chat-style models.
    Messages(Vec<ChatMessage>),
}

impl PromptInput {
    /// Create a text prompt.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a chat prompt.
    #[must_use]
    pub fn messages(messages: Vec<ChatMessage>) -> Self {
        Self::Messages(messages)
    }

    /// The text, if this is a text prompt.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Messages(_) => None,
        }
    }

    /// The messages, if this is a chat prompt.
    #[must_use]
    pub fn as_messages(&self) -> Option<&[ChatMessage]> {
        match self {
            Self::Text(_) => None,
            Self::Messages(messages) => Some(messages),
        }
    }

    /// The content of the last user message, or the whole text prompt.
    #[must_use]
    pub fn last_user_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Messages(messages) => messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .map(|m| m.content.as_str()),
        }
    }

    /// Total number of characters in the prompt.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Messages(messages) => messages.iter().map(|m| m.content.len()).sum(),
        }
    }

    /// Whether the prompt has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PromptInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Messages(messages) => {
                for (i, message) in messages.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{message}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<String> for PromptInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for PromptInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<ChatMessage>> for PromptInput {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self::Messages(messages)
    }
}

/// A language model that completes a prompt.
///
/// Retries and timeouts are the implementation's business; callers make one
/// call per prompt.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Get the model name.
    fn name(&self) -> &str;

    /// Whether the model takes chat messages rather than a single string.
    fn is_chat(&self) -> bool {
        false
    }

    /// Complete a prompt.
    async fn complete(&self, input: &PromptInput) -> Result<String, ModelError>;
}

#[async_trait]
impl<T: CompletionModel + ?Sized> CompletionModel for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_chat(&self) -> bool {
        (**self).is_chat()
    }

    async fn complete(&self, input: &PromptInput) -> Result<String, ModelError> {
        (**self).complete(input).await
    }
}

#[async_trait]
impl<T: CompletionModel + ?Sized> CompletionModel for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_chat(&self) -> bool {
        (**self).is_chat()
    }

    async fn complete(&self, input: &PromptInput) -> Result<String, ModelError> {
        (**self).complete(input).await
    }
}

/// Shared model for dynamic dispatch.
pub type BoxedModel = Arc<dyn CompletionModel>;
