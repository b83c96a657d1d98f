//! Error types for extraction runs.

use strex_core::SchemaError;
use strex_describe::DescribeError;
use strex_models::ModelError;
use strex_output::EncodeError;
use strex_prompt::PromptError;
use thiserror::Error;

/// Errors that stop an extraction.
///
/// Decode and validation problems do not appear here: they are collected in
/// [`Extraction::errors`](crate::Extraction::errors).
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The schema could not be built or loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The schema could not be described.
    #[error(transparent)]
    Describe(#[from] DescribeError),

    /// An example could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The prompt could not be assembled.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The model call failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A document has no `uid` in its metadata.
    #[error("uid not found in document metadata for document {index}")]
    MissingUid {
        /// Position of the document in the batch.
        index: usize,
    },
}

impl ExtractionError {
    /// Create a missing uid error.
    pub fn missing_uid(index: usize) -> Self {
        Self::MissingUid { index }
    }

    /// Whether the model call failed.
    #[must_use]
    pub fn is_model_error(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

/// Result type for extraction runs.
pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_error() {
        let err: ExtractionError = ModelError::api("down").into();
        assert!(err.is_model_error());
        assert_eq!(err.to_string(), "API error: down");
    }

    #[test]
    fn test_missing_uid_message() {
        assert_eq!(
            ExtractionError::missing_uid(3).to_string(),
            "uid not found in document metadata for document 3"
        );
    }
}
