//! # strex-core
//!
//! Schema node model for the strex extraction toolkit.
//!
//! This crate provides the types every other strex crate consumes:
//!
//! - **Nodes**: [`Object`], [`Text`], [`Number`], [`Bool`], [`Selection`]
//!   and [`SelectionOption`], with validated ids and worked examples
//! - **Visitor**: double dispatch over node kinds via [`Visitor`]
//! - **Serializer**: the persisted JSON schema format
//! - **Messages**: chat messages for chat-style prompts
//! - **Errors**: [`SchemaError`], raised eagerly at construction or load time
//!
//! ## Example
//!
//! ```rust
//! use strex_core::{serializer, Number, Object, Selection, SelectionOption, Text};
//!
//! let person = Object::new("person")
//!     .unwrap()
//!     .with_description("Personal information")
//!     .with_example("Alice is 30", serde_json::json!({"name": "Alice", "age": 30}))
//!     .with_attribute(Text::new("name").unwrap().with_description("First name"))
//!     .with_attribute(Number::new("age").unwrap())
//!     .with_attribute(
//!         Selection::new("pet")
//!             .unwrap()
//!             .with_option(SelectionOption::new("cat").unwrap())
//!             .with_option(SelectionOption::new("dog").unwrap()),
//!     );
//!
//! let json = serializer::dumps(&person).unwrap();
//! assert_eq!(serializer::loads(&json).unwrap(), person);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod errors;
pub mod identifier;
pub mod messages;
pub mod nodes;
pub mod serializer;
pub mod visitor;

pub use errors::{Result, SchemaError};
pub use identifier::NodeId;
pub use messages::{ChatMessage, Role};
pub use nodes::{
    is_empty_value, Bool, Example, NodeKind, NodeRef, Number, Object, SchemaNode, Selection,
    SelectionOption, Text,
};
pub use visitor::Visitor;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::errors::{Result, SchemaError};
    pub use crate::messages::{ChatMessage, Role};
    pub use crate::nodes::{
        Bool, Example, NodeKind, NodeRef, Number, Object, SchemaNode, Selection,
        SelectionOption, Text,
    };
    pub use crate::visitor::Visitor;
}
