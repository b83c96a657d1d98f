//! # strex-prompt
//!
//! Prompt assembly for schema-driven extraction.
//!
//! - **[`generate_examples`]**: walk a schema and collect every worked
//!   example, namespaced under the root id
//! - **[`encode_examples`]**: render example outputs in an encoder's format
//! - **[`InputFormatter`]**: fence long inputs off from the prompt
//! - **[`InstructionTemplate`]**: the instruction text around the type
//!   description and format instructions
//! - **[`ExtractionPrompt`]**: put it all together as a string or as chat
//!   messages
//!
//! ## Example
//!
//! ```rust
//! use strex_core::{Object, Role, Text};
//! use strex_prompt::{ExtractionPrompt, InputFormatter};
//!
//! let schema = Object::new("person")
//!     .unwrap()
//!     .with_description("People mentioned in the text")
//!     .with_attribute(
//!         Text::new("name")
//!             .unwrap()
//!             .with_description("First name")
//!             .with_example("Alice went home", "Alice"),
//!     );
//!
//! let prompt = ExtractionPrompt::new(schema).with_input_formatter(InputFormatter::TripleQuotes);
//! let messages = prompt.to_messages("Bob stayed").unwrap();
//!
//! assert_eq!(messages[0].role, Role::System);
//! assert_eq!(messages[2].content, "<person><name>Alice</name></person>");
//! assert_eq!(messages[3].content, "\"\"\"\nBob stayed\n\"\"\"");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod examples;
pub mod formatter;
pub mod prompt;
pub mod template;

pub use error::{PromptError, Result};
pub use examples::{encode_examples, generate_examples, EncodedExample, ExampleAggregator};
pub use formatter::InputFormatter;
pub use prompt::ExtractionPrompt;
pub use template::{InstructionTemplate, DEFAULT_INSTRUCTION_TEMPLATE};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::error::{PromptError, Result};
    pub use crate::examples::{encode_examples, generate_examples, EncodedExample};
    pub use crate::formatter::InputFormatter;
    pub use crate::prompt::ExtractionPrompt;
    pub use crate::template::InstructionTemplate;
}
