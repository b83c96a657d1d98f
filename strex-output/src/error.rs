//! Error types for encoding, decoding, and validating model output.

use thiserror::Error;

/// Error while encoding examples into a wire format.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value has no representation in the wire format.
    #[error("Cannot encode value of type {type_name} under tag '{tag}'")]
    UnsupportedType {
        /// Tag the value was going to be written under.
        tag: String,
        /// JSON type of the value.
        type_name: &'static str,
    },

    /// The top-level value must be a mapping of tag name to value.
    #[error("Expected a mapping at the top level, got {type_name}")]
    NotAMapping {
        /// JSON type of the value.
        type_name: &'static str,
    },

    /// JSON serialization failed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Custom encode error.
    #[error("Encode error: {0}")]
    Custom(String),
}

impl EncodeError {
    /// Create an unsupported type error.
    pub fn unsupported_type(tag: impl Into<String>, type_name: &'static str) -> Self {
        Self::UnsupportedType {
            tag: tag.into(),
            type_name,
        }
    }

    /// Create a custom encode error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Error while decoding a model completion.
///
/// Decode failures are an expected outcome for untrusted model output; they
/// are collected into an extraction's error list, not raised to the caller.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The completion contained malformed JSON.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Data was decoded, but not under the schema's root id.
    #[error(
        "The LLM has returned structured data which does not match the expected schema. \
         Providing additional examples may help improve the parse."
    )]
    SchemaMismatch {
        /// The root id that was expected.
        expected: String,
    },

    /// The completion held tags that do not follow the tag grammar.
    #[error("Malformed tagged output: {reason}")]
    MalformedTags {
        /// What went wrong.
        reason: String,
    },

    /// Custom parse error.
    #[error("Parse error: {0}")]
    Custom(String),
}

impl ParseError {
    /// Create a malformed tags error.
    pub fn malformed_tags(reason: impl Into<String>) -> Self {
        Self::MalformedTags {
            reason: reason.into(),
        }
    }

    /// Create a schema mismatch error.
    pub fn schema_mismatch(expected: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
        }
    }

    /// Create a custom parse error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Error reported by a validator for one item.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The item could not be converted into the target type.
    #[error("Validation failed{}: {source}", index.map(|i| format!(" for item {i}")).unwrap_or_default())]
    Deserialize {
        /// Position of the item when validating a list.
        index: Option<usize>,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The decoded data did not have the expected shape.
    #[error("Invalid shape: {0}")]
    Shape(String),

    /// Custom validation failure.
    #[error("Validation failed: {0}")]
    Failed(String),
}

impl ValidationError {
    /// Create a deserialize error for an item.
    pub fn deserialize(index: Option<usize>, source: serde_json::Error) -> Self {
        Self::Deserialize { index, source }
    }

    /// Create a shape error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Create a failed validation error.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Position of the failing item, if known.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Deserialize { index, .. } => *index,
            _ => None,
        }
    }
}

/// Any problem recorded while turning a completion into an extraction.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Decoding failed or did not match the schema.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A validator rejected (part of) the data.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl OutputError {
    /// Whether this is a decode error.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Whether this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message() {
        let err = EncodeError::unsupported_type("obj", "null");
        assert_eq!(err.to_string(), "Cannot encode value of type null under tag 'obj'");
    }

    #[test]
    fn test_schema_mismatch_message() {
        let err = ParseError::schema_mismatch("person");
        assert!(err.to_string().starts_with("The LLM has returned structured data"));
    }

    #[test]
    fn test_validation_error_index() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ValidationError::deserialize(Some(2), source);
        assert_eq!(err.index(), Some(2));
        assert!(err.to_string().starts_with("Validation failed for item 2: "));

        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ValidationError::deserialize(None, source);
        assert!(err.to_string().starts_with("Validation failed: "));
    }
}
