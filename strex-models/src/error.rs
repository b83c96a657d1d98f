//! Model-related error types.

use std::time::Duration;
use thiserror::Error;

/// Errors from an external completion call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// API-level error.
    #[error("API error: {message}")]
    Api {
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid response from the model.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model does not accept this kind of input.
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// Request cancelled.
    #[error("Request cancelled")]
    Cancelled,

    /// Other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: None,
        }
    }

    /// Create an API error with a code.
    pub fn api_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a not supported error.
    pub fn not_supported(feature: impl Into<String>) -> Self {
        Self::NotSupported(feature.into())
    }
}
