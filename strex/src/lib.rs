//! # strex - Schema-Driven Structured Extraction
//!
//! strex turns free text into structured data with a language model. You
//! describe what to extract as a tree of schema nodes, strex builds a prompt
//! from it (a type description, format instructions and worked examples),
//! calls the model, and decodes the answer back into JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use strex::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let schema = Object::new("person")
//!     .unwrap()
//!     .with_description("Personal information about a person")
//!     .with_many(true)
//!     .with_attribute(
//!         Text::new("first_name")
//!             .unwrap()
//!             .with_description("The first name of a person")
//!             .with_example("Alice and Bob are friends", json!(["Alice", "Bob"])),
//!     )
//!     .with_attribute(Number::new("age").unwrap().with_example("Alice is 3", "3"));
//!
//! let model = MockModel::new("mock")
//!     .with_text_response("<person><first_name>Eugene</first_name><age>18</age></person>");
//! let chain = ExtractionChain::new(model, schema, ExtractionOptions::default());
//!
//! let extraction = chain.run("My name is Eugene and I am 18").await.unwrap();
//! assert_eq!(
//!     extraction.data,
//!     json!({"person": [{"first_name": ["Eugene"], "age": ["18"]}]})
//! );
//! # });
//! ```
//!
//! ## Architecture
//!
//! strex is organized as a workspace of focused crates:
//!
//! - [`strex_core`] - Schema nodes, the visitor and the schema serializer
//! - [`strex_describe`] - TypeScript and bullet point schema descriptions
//! - [`strex_output`] - Tag and JSON encoders, parsing and validation
//! - [`strex_models`] - The completion model trait and test models
//! - [`strex_prompt`] - Example generation and prompt assembly
//!
//! This crate ties them together with [`ExtractionChain`] and
//! [`extract_from_documents`].
//!
//! ## Wire formats
//!
//! The default [`EncoderKind::Xml`] asks the model for nested tags, which
//! decode into lists keyed by tag name. [`EncoderKind::Json`] asks for a
//! JSON document wrapped in `<json>` tags.
//!
//! ## Validation
//!
//! Attach a [`Validator`] to turn decoded data into typed values.
//! [`SerdeValidator`] reshapes tag output by the schema and deserializes it
//! into any `serde` type:
//!
//! ```rust
//! use serde::Deserialize;
//! use strex::prelude::*;
//!
//! #[derive(Debug, Deserialize, serde::Serialize)]
//! struct Person {
//!     name: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let schema = Object::new("person")
//!     .unwrap()
//!     .with_attribute(Text::new("name").unwrap());
//! let model = FunctionModel::constant_text("<person><name>Ann</name></person>");
//! let chain = ExtractionChain::new(model, schema.clone(), ExtractionOptions::default())
//!     .with_validator(SerdeValidator::<Person>::for_schema(schema));
//!
//! let extraction = chain.run("Ann").await.unwrap();
//! assert_eq!(extraction.validated_data, serde_json::json!({"name": "Ann"}));
//! # });
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod batch;
pub mod chain;
pub mod config;
pub mod document;
pub mod error;

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Schema nodes, visitor and serializer.
pub use strex_core as core;

/// Schema descriptions.
pub use strex_describe as describe;

/// Encoders, parsing and validation.
pub use strex_output as output;

/// Completion models.
pub use strex_models as models;

/// Prompt assembly.
pub use strex_prompt as prompt;

// ============================================================================
// Type Re-exports
// ============================================================================

// Schema
pub use strex_core::{
    serializer, Bool, ChatMessage, Example, NodeKind, NodeRef, Number, Object, Role, SchemaError,
    SchemaNode, Selection, SelectionOption, Text, Visitor,
};

// Descriptions
pub use strex_describe::{describe, DescribeError, DescriptorKind, TypeDescriptor};

// Output
pub use strex_output::{
    EncodeError, Encoder, EncoderKind, Extraction, ExtractionParser, FnValidator, JsonEncoder,
    OutputError, ParseError, SerdeValidator, ValidationError, Validator, XmlEncoder,
};

// Models
pub use strex_models::{
    BoxedModel, CompletionModel, FunctionModel, MockModel, ModelError, PromptInput,
};

// Prompt
pub use strex_prompt::{
    generate_examples, ExtractionPrompt, InputFormatter, InstructionTemplate, PromptError,
};

// This crate
pub use batch::{extract_from_documents, extract_from_documents_with};
pub use chain::ExtractionChain;
pub use config::{BatchOptions, ExtractionOptions};
pub use document::{Document, DocumentExtraction};
pub use error::{ExtractionError, Result};

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient prelude for common imports.
///
/// ```rust
/// use strex::prelude::*;
/// ```
pub mod prelude {
    // Schema
    pub use crate::core::{Bool, Number, Object, Selection, SelectionOption, Text};

    // Output
    pub use crate::output::{EncoderKind, Extraction, SerdeValidator, Validator};

    // Models
    pub use crate::models::{CompletionModel, FunctionModel, MockModel, PromptInput};

    // Prompt
    pub use crate::describe::DescriptorKind;
    pub use crate::prompt::InputFormatter;

    // Extraction
    pub use crate::batch::extract_from_documents;
    pub use crate::chain::ExtractionChain;
    pub use crate::config::{BatchOptions, ExtractionOptions};
    pub use crate::document::{Document, DocumentExtraction};
    pub use crate::error::{ExtractionError, Result};
}
