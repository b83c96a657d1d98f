//! Prompt assembly errors.

use strex_core::NodeKind;
use strex_describe::DescribeError;
use strex_output::EncodeError;
use thiserror::Error;

/// Errors raised while building a prompt.
///
/// These are schema or configuration mistakes, so they are raised rather
/// than collected.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A node kind was visited where it cannot appear.
    #[error("Cannot aggregate examples from a {kind} node '{id}' directly")]
    UnexpectedNode {
        /// Kind of the node.
        kind: NodeKind,
        /// Id of the node.
        id: String,
    },

    /// An example output could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The type description could not be rendered.
    #[error(transparent)]
    Describe(#[from] DescribeError),

    /// An unknown input formatter name.
    #[error("Unknown input formatter: {0}. Use one of \"none\", \"triple_quotes\", \"text_prefix\"")]
    UnknownFormatter(String),
}

impl PromptError {
    /// Create an unexpected node error.
    pub fn unexpected_node(kind: NodeKind, id: impl Into<String>) -> Self {
        Self::UnexpectedNode {
            kind,
            id: id.into(),
        }
    }
}

/// Result type for prompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;
