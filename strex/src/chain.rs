//! The extraction chain: prompt, model call, parse.

use std::sync::Arc;
use strex_core::Object;
use strex_models::{BoxedModel, CompletionModel, PromptInput};
use strex_output::{Extraction, ExtractionParser, Validator};
use strex_prompt::ExtractionPrompt;
use tracing::{debug, warn};

use crate::config::ExtractionOptions;
use crate::error::Result;

/// Extracts structured data from text with one schema and one model.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex::prelude::*;
///
/// # tokio_test::block_on(async {
/// let schema = Object::new("person")
///     .unwrap()
///     .with_attribute(Text::new("name").unwrap().with_example("Alice is here", "Alice"));
///
/// let model = MockModel::new("mock").with_text_response("<person><name>Bob</name></person>");
/// let chain = ExtractionChain::new(model, schema, ExtractionOptions::default());
///
/// let extraction = chain.run("Bob arrived").await.unwrap();
/// assert_eq!(extraction.data, json!({"person": [{"name": ["Bob"]}]}));
/// assert!(extraction.errors.is_empty());
/// # });
/// ```
#[derive(Clone)]
pub struct ExtractionChain {
    model: BoxedModel,
    prompt: ExtractionPrompt,
    parser: ExtractionParser,
}

impl std::fmt::Debug for ExtractionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionChain")
            .field("model", &self.model.name())
            .field("prompt", &self.prompt)
            .field("parser", &self.parser)
            .finish()
    }
}

impl ExtractionChain {
    /// Create a chain.
    pub fn new(
        model: impl CompletionModel + 'static,
        schema: Object,
        options: ExtractionOptions,
    ) -> Self {
        Self::from_arc(Arc::new(model), schema, options)
    }

    /// Create a chain from a shared model.
    pub fn from_arc(model: BoxedModel, schema: Object, options: ExtractionOptions) -> Self {
        let encoder = options.encoder.encoder();

        let mut prompt = ExtractionPrompt::new(schema.clone())
            .with_encoder_arc(encoder.clone())
            .with_descriptor_arc(options.type_descriptor.descriptor())
            .with_input_formatter(options.input_formatter);
        if let Some(template) = options.instruction_template {
            prompt = prompt.with_instruction_template(template);
        }

        Self {
            model,
            prompt,
            parser: ExtractionParser::from_arc(encoder, schema),
        }
    }

    /// Validate decoded data with `validator`.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.parser = self.parser.with_validator(validator);
        self
    }

    /// Replace the prompt builder.
    ///
    /// The parser keeps its encoder, so the new prompt should use the same
    /// wire format.
    #[must_use]
    pub fn with_prompt(mut self, prompt: ExtractionPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// The schema.
    #[must_use]
    pub fn schema(&self) -> &Object {
        self.parser.schema()
    }

    /// The model.
    #[must_use]
    pub fn model(&self) -> &BoxedModel {
        &self.model
    }

    /// The prompt builder.
    #[must_use]
    pub fn prompt_builder(&self) -> &ExtractionPrompt {
        &self.prompt
    }

    /// Build the prompt for `text` in the shape the model expects.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be described or an example cannot be
    /// encoded.
    pub fn prompt(&self, text: &str) -> Result<PromptInput> {
        Ok(self.prompt.format(text, self.model.is_chat())?)
    }

    /// Parse a completion. Never fails; see [`Extraction::errors`].
    #[must_use]
    pub fn parse(&self, raw: &str) -> Extraction {
        self.parser.parse(raw)
    }

    /// Run extraction on `text`.
    ///
    /// # Errors
    ///
    /// Fails if the prompt cannot be built or the model call fails. Decode
    /// and validation problems are returned in the extraction.
    pub async fn run(&self, text: &str) -> Result<Extraction> {
        let input = self.prompt(text)?;

        debug!(model = self.model.name(), prompt_len = input.len(), "Calling model");
        let raw = match self.model.complete(&input).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "Model call failed");
                return Err(e.into());
            }
        };
        debug!(model = self.model.name(), completion_len = raw.len(), "Model returned");

        Ok(self.parse(&raw))
    }
}
