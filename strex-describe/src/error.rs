//! Error types for type description rendering.

use strex_core::NodeKind;
use thiserror::Error;

/// Errors raised while rendering a type description.
///
/// These indicate a schema design mistake, not bad runtime data, and are
/// never swallowed by the pipeline.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// The renderer has no representation for this node kind here.
    #[error("Cannot describe a {kind} node: {message}")]
    NotImplemented {
        /// The offending node kind.
        kind: NodeKind,
        /// Where it was encountered.
        message: String,
    },

    /// A descriptor name did not match any known descriptor.
    #[error("Unknown type descriptor: {0}")]
    UnknownDescriptor(String),
}

impl DescribeError {
    /// Create a not-implemented error.
    pub fn not_implemented(kind: NodeKind, message: impl Into<String>) -> Self {
        Self::NotImplemented {
            kind,
            message: message.into(),
        }
    }
}

/// Result type alias using [`DescribeError`].
pub type Result<T> = std::result::Result<T, DescribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_message() {
        let err = DescribeError::not_implemented(NodeKind::Option, "options render inside their selection");
        assert_eq!(
            err.to_string(),
            "Cannot describe a Option node: options render inside their selection"
        );
    }

    #[test]
    fn test_unknown_descriptor_message() {
        let err = DescribeError::UnknownDescriptor("yaml".into());
        assert!(err.to_string().contains("yaml"));
    }
}
