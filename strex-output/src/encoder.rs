//! The encoder seam.
//!
//! An encoder owns one wire format end to end: it renders few-shot example
//! outputs, decodes model completions, and supplies the format instructions
//! embedded in the prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{EncodeResult, ParseResult};
use crate::json::JsonEncoder;
use crate::xml::XmlEncoder;

/// A wire format shared by the prompt examples and the model's answer.
pub trait Encoder: Send + Sync {
    /// Short name of the format.
    fn name(&self) -> &'static str;

    /// Encode an example output.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`](crate::EncodeError) if the value has no
    /// representation in this format.
    fn encode(&self, data: &JsonValue) -> EncodeResult<String>;

    /// Decode a model completion.
    ///
    /// Malformed input should decode to an empty mapping where the format
    /// allows it; hard failures are returned as a
    /// [`ParseError`](crate::ParseError).
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`](crate::ParseError) if decoding fails.
    fn decode(&self, text: &str) -> ParseResult<JsonValue>;

    /// Instructions telling the model how to format its answer.
    fn instruction_segment(&self) -> &str;
}

impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode(&self, data: &JsonValue) -> EncodeResult<String> {
        (**self).encode(data)
    }

    fn decode(&self, text: &str) -> ParseResult<JsonValue> {
        (**self).decode(text)
    }

    fn instruction_segment(&self) -> &str {
        (**self).instruction_segment()
    }
}

impl<T: Encoder + ?Sized> Encoder for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn encode(&self, data: &JsonValue) -> EncodeResult<String> {
        (**self).encode(data)
    }

    fn decode(&self, text: &str) -> ParseResult<JsonValue> {
        (**self).decode(text)
    }

    fn instruction_segment(&self) -> &str {
        (**self).instruction_segment()
    }
}

/// Built-in encoders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Nested tags, see [`XmlEncoder`].
    #[default]
    Xml,
    /// Tagged JSON, see [`JsonEncoder`].
    Json,
}

impl EncoderKind {
    /// Get all built-in encoder kinds.
    #[must_use]
    pub fn all() -> &'static [EncoderKind] {
        &[Self::Xml, Self::Json]
    }

    /// The canonical name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }

    /// Build the encoder for this kind with default settings.
    #[must_use]
    pub fn encoder(&self) -> Arc<dyn Encoder> {
        match self {
            Self::Xml => Arc::new(XmlEncoder::new()),
            Self::Json => Arc::new(JsonEncoder::new()),
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EncoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown encoder: {}. Use one of {:?}",
                s,
                Self::all().iter().map(EncoderKind::as_str).collect::<Vec<_>>()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("xml", EncoderKind::Xml)]
    #[case("XML", EncoderKind::Xml)]
    #[case("Json", EncoderKind::Json)]
    fn test_from_str(#[case] input: &str, #[case] expected: EncoderKind) {
        assert_eq!(input.parse::<EncoderKind>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown_lists_choices() {
        let err = "csv".parse::<EncoderKind>().unwrap_err();
        assert!(err.contains("Unknown encoder: csv"));
        assert!(err.contains("xml"));
        assert!(err.contains("json"));
    }

    #[test]
    fn test_encoder_names_match_kind() {
        for kind in EncoderKind::all() {
            assert_eq!(kind.encoder().name(), kind.as_str());
            assert!(!kind.encoder().instruction_segment().is_empty());
        }
    }

    #[test]
    fn test_dyn_encoder_round_trip() {
        let data = json!({"obj": {"name": "Bob"}});
        let xml = EncoderKind::Xml.encoder();
        assert_eq!(
            xml.decode(&xml.encode(&data).unwrap()).unwrap(),
            json!({"obj": [{"name": ["Bob"]}]})
        );
        let json_encoder = EncoderKind::Json.encoder();
        assert_eq!(
            json_encoder.decode(&json_encoder.encode(&data).unwrap()).unwrap(),
            data
        );
    }
}
