//! Mock and function-based models for testing.
//!
//! - [`MockModel`]: returns queued replies in order
//! - [`FunctionModel`]: answers with a closure over the prompt
//!
//! # Examples
//!
//! ```rust
//! use strex_models::{CompletionModel, MockModel, PromptInput};
//!
//! # tokio_test::block_on(async {
//! let model = MockModel::new("test")
//!     .with_text_response("<obj><name>Bob</name></obj>")
//!     .with_error_response("overloaded");
//!
//! let input = PromptInput::text("Bob is here");
//! assert_eq!(model.complete(&input).await.unwrap(), "<obj><name>Bob</name></obj>");
//! assert!(model.complete(&input).await.is_err());
//! assert_eq!(model.call_count(), 2);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::ModelError;
use crate::model::{CompletionModel, PromptInput};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

// ============================================================================
// MockModel - Simple pre-configured mock
// ============================================================================

/// A mock model that returns pre-configured replies in order.
///
/// When the queue runs dry it answers with an empty string, which decodes
/// to "nothing extracted".
#[derive(Debug, Clone)]
pub struct MockModel {
    name: String,
    chat: bool,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<PromptInput>>>,
}

impl MockModel {
    /// Create a new mock model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chat: false,
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a text reply.
    #[must_use]
    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Text(text.into()));
        self
    }

    /// Queue a failing reply.
    #[must_use]
    pub fn with_error_response(self, message: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Error(message.into()));
        self
    }

    /// Mark the model as chat-style.
    #[must_use]
    pub fn chat(mut self, chat: bool) -> Self {
        self.chat = chat;
        self
    }

    /// Get recorded prompts.
    pub fn recorded_requests(&self) -> Vec<PromptInput> {
        lock(&self.requests).clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Clear recorded prompts.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_chat(&self) -> bool {
        self.chat
    }

    async fn complete(&self, input: &PromptInput) -> Result<String, ModelError> {
        lock(&self.requests).push(input.clone());

        let reply = lock(&self.replies).pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(ModelError::api(message)),
            None => Ok(String::new()),
        }
    }
}

// ============================================================================
// FunctionModel - Dynamic function-based model
// ============================================================================

/// Type alias for function model callback.
pub type FunctionDef = dyn Fn(&PromptInput) -> Result<String, ModelError> + Send + Sync;

/// A model controlled by a local function.
///
/// # Example
///
/// ```rust
/// use strex_models::{CompletionModel, FunctionModel, PromptInput};
///
/// # tokio_test::block_on(async {
/// let model = FunctionModel::new(|input: &PromptInput| {
///     Ok(format!("<len>{}</len>", input.len()))
/// });
/// assert_eq!(model.complete(&"abc".into()).await.unwrap(), "<len>3</len>");
/// # });
/// ```
#[derive(Clone)]
pub struct FunctionModel {
    name: String,
    chat: bool,
    delay: Option<Duration>,
    function: Arc<FunctionDef>,
}

impl std::fmt::Debug for FunctionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionModel")
            .field("name", &self.name)
            .field("chat", &self.chat)
            .field("delay", &self.delay)
            .finish()
    }
}

impl FunctionModel {
    /// Create a new FunctionModel with a response function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&PromptInput) -> Result<String, ModelError> + Send + Sync + 'static,
    {
        Self {
            name: "function-model".to_string(),
            chat: false,
            delay: None,
            function: Arc::new(function),
        }
    }

    /// Create a model that always returns the same text.
    pub fn constant_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Create a model that echoes the last user message.
    pub fn echo() -> Self {
        Self::new(|input| Ok(input.last_user_text().unwrap_or_default().to_string()))
    }

    /// Set a custom model name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark the model as chat-style.
    #[must_use]
    pub fn chat(mut self, chat: bool) -> Self {
        self.chat = chat;
        self
    }

    /// Sleep before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl CompletionModel for FunctionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_chat(&self) -> bool {
        self.chat
    }

    async fn complete(&self, input: &PromptInput) -> Result<String, ModelError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.function)(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strex_core::ChatMessage;

    #[tokio::test]
    async fn test_mock_model_replies_in_order() {
        let model = MockModel::new("mock")
            .with_text_response("first")
            .with_text_response("second");
        let input = PromptInput::text("hi");

        assert_eq!(model.complete(&input).await.unwrap(), "first");
        assert_eq!(model.complete(&input).await.unwrap(), "second");
        assert_eq!(model.complete(&input).await.unwrap(), "");
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_model_records_requests() {
        let model = MockModel::new("mock").chat(true);
        assert!(model.is_chat());

        let input = PromptInput::messages(vec![ChatMessage::user("hello")]);
        model.complete(&input).await.unwrap();
        assert_eq!(model.recorded_requests(), vec![input]);

        model.clear_requests();
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_model_error() {
        let model = MockModel::new("mock").with_error_response("overloaded");
        let err = model.complete(&PromptInput::text("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "API error: overloaded");
    }

    #[tokio::test]
    async fn test_clones_share_queue() {
        let model = MockModel::new("mock").with_text_response("only");
        let clone = model.clone();
        assert_eq!(clone.complete(&"x".into()).await.unwrap(), "only");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_function_model_echo() {
        let model = FunctionModel::echo().with_name("echo");
        assert_eq!(model.name(), "echo");
        let input = PromptInput::messages(vec![
            ChatMessage::system("sys"),
            ChatMessage::user("ping"),
        ]);
        assert_eq!(model.complete(&input).await.unwrap(), "ping");
    }

    #[tokio::test]
    async fn test_function_model_delay() {
        let model = FunctionModel::constant_text("done").with_delay(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        assert_eq!(model.complete(&"x".into()).await.unwrap(), "done");
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_boxed_model() {
        let model: crate::BoxedModel = Arc::new(FunctionModel::constant_text("a"));
        assert_eq!(model.complete(&"x".into()).await.unwrap(), "a");
    }
}
