//! Extraction and batch configuration.

use serde::{Deserialize, Serialize};
use strex_describe::DescriptorKind;
use strex_output::EncoderKind;
use strex_prompt::{InputFormatter, InstructionTemplate};

/// How prompts are built and completions decoded.
///
/// # Example
///
/// ```rust
/// use strex::{EncoderKind, ExtractionOptions, InputFormatter};
///
/// let options: ExtractionOptions = serde_json::from_str(
///     r#"{"encoder": "json", "input_formatter": "triple_quotes"}"#,
/// )
/// .unwrap();
/// assert_eq!(options.encoder, EncoderKind::Json);
/// assert_eq!(options.input_formatter, InputFormatter::TripleQuotes);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Wire format for examples and answers.
    pub encoder: EncoderKind,
    /// How the schema is described to the model.
    pub type_descriptor: DescriptorKind,
    /// How input text is presented.
    pub input_formatter: InputFormatter,
    /// Replaces the default instruction template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction_template: Option<InstructionTemplate>,
}

impl ExtractionOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoder.
    #[must_use]
    pub fn encoder(mut self, encoder: EncoderKind) -> Self {
        self.encoder = encoder;
        self
    }

    /// Set the type descriptor.
    #[must_use]
    pub fn type_descriptor(mut self, descriptor: DescriptorKind) -> Self {
        self.type_descriptor = descriptor;
        self
    }

    /// Set the input formatter.
    #[must_use]
    pub fn input_formatter(mut self, formatter: InputFormatter) -> Self {
        self.input_formatter = formatter;
        self
    }

    /// Set the instruction template.
    #[must_use]
    pub fn instruction_template(mut self, template: impl Into<InstructionTemplate>) -> Self {
        self.instruction_template = Some(template.into());
        self
    }
}

/// How a batch of documents is run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Maximum model calls in flight.
    pub max_concurrency: usize,
    /// Return failures in place instead of failing the batch.
    pub return_exceptions: bool,
    /// Take each document's source uid from its `uid` metadata.
    pub use_uid: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            return_exceptions: false,
            use_uid: false,
        }
    }
}

impl BatchOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    #[must_use]
    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    /// Collect failures in place.
    #[must_use]
    pub fn return_exceptions(mut self, enabled: bool) -> Self {
        self.return_exceptions = enabled;
        self
    }

    /// Use metadata uids.
    #[must_use]
    pub fn use_uid(mut self, enabled: bool) -> Self {
        self.use_uid = enabled;
        self
    }

    /// The concurrency limit, never below one.
    #[must_use]
    pub fn permits(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extraction_defaults() {
        let options = ExtractionOptions::default();
        assert_eq!(options.encoder, EncoderKind::Xml);
        assert_eq!(options.type_descriptor, DescriptorKind::Typescript);
        assert_eq!(options.input_formatter, InputFormatter::None);
        assert!(options.instruction_template.is_none());
    }

    #[test]
    fn test_extraction_serde() {
        let options = ExtractionOptions::new()
            .type_descriptor(DescriptorKind::BulletPoint)
            .instruction_template("{format_instructions}");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "encoder": "xml",
                "type_descriptor": "bullet_point",
                "input_formatter": "none",
                "instruction_template": "{format_instructions}"
            })
        );
        let parsed: ExtractionOptions = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_batch_options() {
        let options = BatchOptions::new().max_concurrency(0);
        assert_eq!(options.max_concurrency, 1);

        let parsed: BatchOptions = serde_json::from_str(r#"{"max_concurrency": 0}"#).unwrap();
        assert_eq!(parsed.permits(), 1);
        assert!(!parsed.return_exceptions);
    }
}
