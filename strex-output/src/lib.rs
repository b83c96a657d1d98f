//! # strex-output
//!
//! Encoding, decoding, and validation of structured model output.
//!
//! ## Core Concepts
//!
//! - **[`Encoder`]**: a wire format shared by the prompt's examples and the
//!   model's answer
//! - **[`XmlEncoder`]**: the nested tag format, decoded by a stack-based
//!   [`TagParser`](xml::TagParser)
//! - **[`JsonEncoder`]**: JSON, optionally wrapped in `<json>` tags
//! - **[`Validator`]**: post-decode cleaning that reports errors instead of
//!   failing
//! - **[`ExtractionParser`]**: decode, check against the schema root, and
//!   validate, producing an [`Extraction`]
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use strex_output::{Encoder, XmlEncoder};
//!
//! let encoder = XmlEncoder::new();
//! let text = encoder
//!     .encode(&json!({"person": [{"name": "Alice"}, {"name": "Bob"}]}))
//!     .unwrap();
//! assert_eq!(text, "<person><name>Alice</name></person><person><name>Bob</name></person>");
//!
//! assert_eq!(
//!     encoder.decode(&text).unwrap(),
//!     json!({"person": [{"name": ["Alice"]}, {"name": ["Bob"]}]})
//! );
//! ```
//!
//! ## Typed validation
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use strex_core::{Object, Text};
//! use strex_output::{ExtractionParser, SerdeValidator, XmlEncoder};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     name: String,
//! }
//!
//! let schema = Object::new("person")
//!     .unwrap()
//!     .with_many(true)
//!     .with_attribute(Text::new("name").unwrap());
//! let parser = ExtractionParser::new(XmlEncoder::new(), schema.clone())
//!     .with_validator(SerdeValidator::<Person>::for_schema(schema));
//!
//! let extraction = parser.parse("<person><name>Alice</name></person>");
//! assert_eq!(extraction.validated_data, json!([{"name": "Alice"}]));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod error;
pub mod json;
pub mod parser;
pub mod shape;
pub mod types;
pub mod utils;
pub mod validator;
pub mod xml;

pub use encoder::{Encoder, EncoderKind};
pub use error::{EncodeError, EncodeResult, OutputError, ParseError, ParseResult, ValidationError};
pub use json::JsonEncoder;
pub use parser::{Extraction, ExtractionParser};
pub use shape::shape_by_schema;
pub use types::{tag_map_to_json, TagMap, TagValue};
pub use utils::{unwrap_tag, wrap_in_tag};
pub use validator::{CleanedData, FnValidator, SerdeValidator, Validator};
pub use xml::{decode_tags, try_decode_tags, XmlEncoder};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::encoder::{Encoder, EncoderKind};
    pub use crate::error::{EncodeError, OutputError, ParseError, ValidationError};
    pub use crate::json::JsonEncoder;
    pub use crate::parser::{Extraction, ExtractionParser};
    pub use crate::validator::{FnValidator, SerdeValidator, Validator};
    pub use crate::xml::XmlEncoder;
}
