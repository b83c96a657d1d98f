//! Documents and per-document extraction results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use strex_output::Extraction;

/// A piece of text to extract from, plus arbitrary metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The text.
    pub page_content: String,
    /// Metadata; `uid` is used as the source uid when requested.
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl Document {
    /// Create a document without metadata.
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `uid` metadata entry as a string.
    ///
    /// Strings are used as-is; other values use their JSON rendering.
    #[must_use]
    pub fn uid(&self) -> Option<String> {
        match self.metadata.get("uid")? {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// An extraction tied back to the document it came from.
#[derive(Debug, Serialize)]
pub struct DocumentExtraction {
    /// Identifier of this result.
    pub uid: String,
    /// Identifier of the source document.
    pub source_uid: String,
    /// The extraction itself.
    #[serde(flatten)]
    pub extraction: Extraction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uid() {
        assert_eq!(Document::new("x").uid(), None);
        assert_eq!(Document::new("x").with_metadata("uid", "a-1").uid().as_deref(), Some("a-1"));
        assert_eq!(Document::new("x").with_metadata("uid", 7).uid().as_deref(), Some("7"));
        assert_eq!(Document::new("x").with_metadata("uid", JsonValue::Null).uid(), None);
    }

    #[test]
    fn test_document_extraction_serializes_flat() {
        let result = DocumentExtraction {
            uid: "u".into(),
            source_uid: "0".into(),
            extraction: Extraction::empty("raw"),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "uid": "u",
                "source_uid": "0",
                "raw": "raw",
                "data": {},
                "validated_data": {},
                "errors": []
            })
        );
    }
}
