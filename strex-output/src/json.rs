//! JSON codec.
//!
//! Encoded JSON is wrapped in `<json>` tags by default. The tags give the
//! decoder a reliable anchor when the model adds prose around its answer.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value as JsonValue;

use crate::encoder::Encoder;
use crate::error::{EncodeError, EncodeResult, ParseResult};
use crate::utils::{unwrap_tag, wrap_in_tag};

const JSON_INSTRUCTIONS: &str = "Please output the extracted information in JSON format. Do not \
    output anything except for the extracted information. Do not add any clarifying information. \
    Do not add any fields that are not in the schema. If the text contains attributes that do not \
    appear in the schema, please ignore them. All output must be in JSON format and follow the \
    schema specified above. Wrap the JSON in <json> tags.";

/// Writes JSON with `", "` and `": "` separators, optionally escaping all
/// non-ASCII characters as `\uXXXX`.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter {
    ensure_ascii: bool,
}

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.ensure_ascii || fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Encoder for JSON output.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_output::{Encoder, JsonEncoder};
///
/// let encoder = JsonEncoder::new();
/// let text = encoder.encode(&json!({"object": [{"a": 1}]})).unwrap();
/// assert_eq!(text, r#"<json>{"object": [{"a": 1}]}</json>"#);
/// assert_eq!(encoder.decode(&text).unwrap(), json!({"object": [{"a": 1}]}));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct JsonEncoder {
    use_tags: bool,
    ensure_ascii: bool,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEncoder {
    /// Create an encoder that wraps output in `<json>` tags.
    #[must_use]
    pub fn new() -> Self {
        Self {
            use_tags: true,
            ensure_ascii: false,
        }
    }

    /// Set whether to wrap output in `<json>` tags.
    #[must_use]
    pub fn use_tags(mut self, use_tags: bool) -> Self {
        self.use_tags = use_tags;
        self
    }

    /// Set whether to escape non-ASCII characters.
    #[must_use]
    pub fn ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }
}

impl Encoder for JsonEncoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, data: &JsonValue) -> EncodeResult<String> {
        let mut buf = Vec::new();
        let formatter = SpacedFormatter {
            ensure_ascii: self.ensure_ascii,
        };
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut serializer)?;
        let content = String::from_utf8(buf).map_err(|e| EncodeError::custom(e.to_string()))?;

        if self.use_tags {
            Ok(wrap_in_tag("json", &content))
        } else {
            Ok(content)
        }
    }

    fn decode(&self, text: &str) -> ParseResult<JsonValue> {
        let content = if self.use_tags {
            match unwrap_tag("json", text) {
                Some(content) => content,
                None => return Ok(JsonValue::Object(Default::default())),
            }
        } else {
            text
        };
        Ok(serde_json::from_str(content)?)
    }

    fn instruction_segment(&self) -> &str {
        JSON_INSTRUCTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"object": [{"number": ["1"]}]}), r#"{"object": [{"number": ["1"]}]}"#)]
    #[case(json!({"object": [{"text": ["3"]}]}), r#"{"object": [{"text": ["3"]}]}"#)]
    #[case(
        json!({"object": [{"selection": ["option"]}]}),
        r#"{"object": [{"selection": ["option"]}]}"#
    )]
    fn test_untagged(#[case] data: JsonValue, #[case] expected: &str) {
        let encoder = JsonEncoder::new().use_tags(false);
        assert_eq!(encoder.encode(&data).unwrap(), expected);
        assert_eq!(encoder.decode(expected).unwrap(), data);
    }

    #[test]
    fn test_tagged() {
        let encoder = JsonEncoder::new();
        assert_eq!(
            encoder.encode(&json!({"object": [{"a": 1}]})).unwrap(),
            r#"<json>{"object": [{"a": 1}]}</json>"#
        );
        assert_eq!(
            encoder
                .decode(r#"Sure! Here you go: <json>{"object": [{"a": 1}]}</json>"#)
                .unwrap(),
            json!({"object": [{"a": 1}]})
        );
    }

    #[test]
    fn test_missing_tags_decode_to_empty() {
        let encoder = JsonEncoder::new();
        assert_eq!(encoder.decode("I found nothing.").unwrap(), json!({}));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let encoder = JsonEncoder::new();
        let err = encoder.decode("<json>{\"a\": </json>").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_non_ascii() {
        let text = json!("我喜欢珍珠奶茶");

        let escaped = JsonEncoder::new().ensure_ascii(true);
        assert_eq!(
            escaped.encode(&text).unwrap(),
            r#"<json>"\u6211\u559c\u6b22\u73cd\u73e0\u5976\u8336"</json>"#
        );
        assert_eq!(escaped.decode(&escaped.encode(&text).unwrap()).unwrap(), text);

        let raw = JsonEncoder::new();
        assert_eq!(raw.encode(&text).unwrap(), "<json>\"我喜欢珍珠奶茶\"</json>");
        assert_eq!(raw.decode("<json>\"我喜欢珍珠奶茶\"</json>").unwrap(), text);
    }

    #[test]
    fn test_ensure_ascii_surrogate_pairs() {
        let encoder = JsonEncoder::new().use_tags(false).ensure_ascii(true);
        assert_eq!(encoder.encode(&json!("😀")).unwrap(), r#""\ud83d\ude00""#);
    }
}
