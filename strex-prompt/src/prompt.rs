//! Extraction prompt assembly.
//!
//! A prompt has three parts:
//!
//! 1. instructions: the instruction template filled with the schema's type
//!    description and the encoder's format instructions
//! 2. worked examples, aggregated from the schema and encoded
//! 3. the user's input
//!
//! The same parts render as one string for completion-style models or as
//! chat messages for chat-style models.

use std::sync::Arc;
use strex_core::{ChatMessage, Object};
use strex_describe::{DescriptorKind, TypeDescriptor};
use strex_models::PromptInput;
use strex_output::{Encoder, EncoderKind};
use tracing::debug;

use crate::error::Result;
use crate::examples::{encode_examples, generate_examples, EncodedExample};
use crate::formatter::InputFormatter;
use crate::template::InstructionTemplate;

/// Builds extraction prompts for one schema.
///
/// # Example
///
/// ```rust
/// use strex_core::{Object, Text};
/// use strex_prompt::ExtractionPrompt;
///
/// let schema = Object::new("person")
///     .unwrap()
///     .with_attribute(Text::new("name").unwrap().with_example("Alice here", "Alice"));
///
/// let prompt = ExtractionPrompt::new(schema).to_string("Bob here").unwrap();
/// assert!(prompt.contains("Input: Alice here\nOutput: <person><name>Alice</name></person>"));
/// assert!(prompt.ends_with("Input: Bob here\nOutput:"));
/// ```
#[derive(Clone)]
pub struct ExtractionPrompt {
    schema: Object,
    encoder: Arc<dyn Encoder>,
    descriptor: Arc<dyn TypeDescriptor>,
    input_formatter: InputFormatter,
    instruction_template: InstructionTemplate,
}

impl std::fmt::Debug for ExtractionPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPrompt")
            .field("schema", &self.schema.id().as_str())
            .field("encoder", &self.encoder.name())
            .field("descriptor", &self.descriptor.name())
            .field("input_formatter", &self.input_formatter)
            .finish()
    }
}

impl ExtractionPrompt {
    /// Create a prompt with the tag encoder and TypeScript descriptions.
    pub fn new(schema: Object) -> Self {
        Self {
            schema,
            encoder: EncoderKind::default().encoder(),
            descriptor: DescriptorKind::default().descriptor(),
            input_formatter: InputFormatter::default(),
            instruction_template: InstructionTemplate::default(),
        }
    }

    /// Set the encoder.
    #[must_use]
    pub fn with_encoder(self, encoder: impl Encoder + 'static) -> Self {
        self.with_encoder_arc(Arc::new(encoder))
    }

    /// Set a shared encoder.
    #[must_use]
    pub fn with_encoder_arc(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set the type descriptor.
    #[must_use]
    pub fn with_descriptor(self, descriptor: impl TypeDescriptor + 'static) -> Self {
        self.with_descriptor_arc(Arc::new(descriptor))
    }

    /// Set a shared type descriptor.
    #[must_use]
    pub fn with_descriptor_arc(mut self, descriptor: Arc<dyn TypeDescriptor>) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Set the input formatter.
    #[must_use]
    pub fn with_input_formatter(mut self, formatter: InputFormatter) -> Self {
        self.input_formatter = formatter;
        self
    }

    /// Set the instruction template.
    #[must_use]
    pub fn with_instruction_template(mut self, template: impl Into<InstructionTemplate>) -> Self {
        self.instruction_template = template.into();
        self
    }

    /// The schema.
    #[must_use]
    pub fn schema(&self) -> &Object {
        &self.schema
    }

    /// The encoder.
    #[must_use]
    pub fn encoder(&self) -> &Arc<dyn Encoder> {
        &self.encoder
    }

    /// The input formatter.
    #[must_use]
    pub fn input_formatter(&self) -> &InputFormatter {
        &self.input_formatter
    }

    /// Render the instruction text.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be described.
    pub fn instructions(&self) -> Result<String> {
        let type_description = if self.instruction_template.uses_type_description() {
            self.descriptor.describe((&self.schema).into())?
        } else {
            String::new()
        };
        Ok(self
            .instruction_template
            .render(&type_description, self.encoder.instruction_segment()))
    }

    /// Aggregate and encode the schema's examples.
    ///
    /// # Errors
    ///
    /// Fails if an example cannot be encoded.
    pub fn examples(&self) -> Result<Vec<EncodedExample>> {
        let examples = generate_examples(&self.schema)?;
        encode_examples(&examples, self.encoder.as_ref(), &self.input_formatter)
    }

    /// Render the prompt as a single string.
    ///
    /// # Errors
    ///
    /// Fails if the instructions or examples cannot be rendered.
    pub fn to_string(&self, text: &str) -> Result<String> {
        let instructions = self.instructions()?;
        let examples = self.examples()?;

        let mut blocks = Vec::with_capacity(examples.len() * 2 + 1);
        for example in &examples {
            blocks.push(format!("Input: {}", example.input));
            blocks.push(format!("Output: {}", example.output));
        }
        blocks.push(format!("Input: {}\nOutput:", self.input_formatter.format(text)));

        Ok(format!("{instructions}\n\n{}", blocks.join("\n")))
    }

    /// Render the prompt as chat messages.
    ///
    /// # Errors
    ///
    /// Fails if the instructions or examples cannot be rendered.
    pub fn to_messages(&self, text: &str) -> Result<Vec<ChatMessage>> {
        let examples = self.examples()?;

        let mut messages = Vec::with_capacity(examples.len() * 2 + 2);
        messages.push(ChatMessage::system(self.instructions()?));
        for example in examples {
            messages.push(ChatMessage::user(example.input));
            messages.push(ChatMessage::assistant(example.output));
        }
        messages.push(ChatMessage::user(self.input_formatter.format(text)));
        Ok(messages)
    }

    /// Render the prompt in the shape a model expects.
    ///
    /// # Errors
    ///
    /// Fails if the instructions or examples cannot be rendered.
    pub fn format(&self, text: &str, chat: bool) -> Result<PromptInput> {
        let input = if chat {
            PromptInput::Messages(self.to_messages(text)?)
        } else {
            PromptInput::Text(self.to_string(text)?)
        };
        debug!(
            schema = %self.schema.id(),
            encoder = self.encoder.name(),
            descriptor = self.descriptor.name(),
            chat,
            len = input.len(),
            "Assembled prompt"
        );
        Ok(input)
    }
}
