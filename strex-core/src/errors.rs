//! Error types for schema construction and persistence.
//!
//! Schema errors are raised eagerly while a tree is being built or loaded,
//! never deferred to prompt generation or decoding.

use thiserror::Error;

/// Errors raised while building, transforming, or loading a schema tree.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A node id does not match `^[a-z_][0-9a-z_]*$`.
    #[error(
        "Invalid identifier '{id}': ids must start with a lowercase letter or underscore \
         and contain only lowercase letters, digits, and underscores"
    )]
    InvalidIdentifier {
        /// The rejected id.
        id: String,
    },

    /// A node kind was used where it is not allowed.
    #[error("Unsupported node kind '{kind}': {message}")]
    UnsupportedNodeKind {
        /// The offending kind name.
        kind: String,
        /// Why it is not allowed here.
        message: String,
    },

    /// A field type has no corresponding schema node kind.
    #[error("Unsupported type for field '{field}': {type_name}")]
    UnsupportedFieldType {
        /// The field being translated.
        field: String,
        /// The type that could not be translated.
        type_name: String,
    },

    /// An example value does not match the kind of its node.
    #[error("Invalid example for '{id}': expected {expected}, got {found}")]
    InvalidExample {
        /// The node owning the example.
        id: String,
        /// The value shape the node accepts.
        expected: String,
        /// The offending value.
        found: String,
    },

    /// A persisted schema could not be deserialized.
    #[error("Failed to deserialize schema: {0}")]
    Deserialize(#[source] serde_json::Error),

    /// A schema could not be serialized.
    #[error("Failed to serialize schema: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl SchemaError {
    /// Create an invalid identifier error.
    pub fn invalid_identifier(id: impl Into<String>) -> Self {
        Self::InvalidIdentifier { id: id.into() }
    }

    /// Create an unsupported node kind error.
    pub fn unsupported_node_kind(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnsupportedNodeKind {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an invalid example error.
    pub fn invalid_example(
        id: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidExample {
            id: id.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported field type error.
    pub fn unsupported_field_type(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}

/// Result type alias using [`SchemaError`].
pub type Result<T> = std::result::Result<T, SchemaError>;
