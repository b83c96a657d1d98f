//! Turning a raw completion into an [`Extraction`].
//!
//! The parser decodes with an [`Encoder`], checks that the decoded data sits
//! under the schema's root id, and runs the optional [`Validator`] on it.
//! Nothing here returns an error: every problem ends up in
//! [`Extraction::errors`].

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::sync::Arc;
use strex_core::Object;
use tracing::{debug, warn};

use crate::encoder::Encoder;
use crate::error::{OutputError, ParseError};
use crate::validator::Validator;

/// The result of parsing one completion.
///
/// The shape is the same whether extraction succeeded, found nothing, or
/// failed: `data` is `{}` unless the completion decoded under the root id,
/// and failures are listed in `errors`.
#[derive(Debug, Serialize)]
pub struct Extraction {
    /// The untouched model completion.
    pub raw: String,
    /// The decoded completion, keyed by the root node's id.
    pub data: JsonValue,
    /// Validator output, or `{}` without a validator.
    pub validated_data: JsonValue,
    /// Decode and validation problems.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<OutputError>,
}

fn serialize_errors<S>(errors: &[OutputError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl Extraction {
    /// An extraction with nothing in it.
    #[must_use]
    pub fn empty(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            data: empty_map(),
            validated_data: empty_map(),
            errors: Vec::new(),
        }
    }

    /// Add an error.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<OutputError>) -> Self {
        self.errors.push(error.into());
        self
    }

    /// Whether any error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether nothing was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.as_object().map_or(true, Map::is_empty)
    }
}

fn empty_map() -> JsonValue {
    JsonValue::Object(Map::new())
}

/// Decodes completions for one schema.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_core::{Object, Text};
/// use strex_output::{ExtractionParser, XmlEncoder};
///
/// let schema = Object::new("obj")
///     .unwrap()
///     .with_attribute(Text::new("name").unwrap());
/// let parser = ExtractionParser::new(XmlEncoder::new(), schema);
///
/// let extraction = parser.parse("<obj><name>Bob</name></obj>");
/// assert_eq!(extraction.data, json!({"obj": [{"name": ["Bob"]}]}));
/// assert!(extraction.errors.is_empty());
/// ```
#[derive(Clone)]
pub struct ExtractionParser {
    encoder: Arc<dyn Encoder>,
    schema: Object,
    validator: Option<Arc<dyn Validator>>,
}

impl fmt::Debug for ExtractionParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionParser")
            .field("encoder", &self.encoder.name())
            .field("schema", &self.schema.id().as_str())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

impl ExtractionParser {
    /// Create a parser without a validator.
    pub fn new(encoder: impl Encoder + 'static, schema: Object) -> Self {
        Self::from_arc(Arc::new(encoder), schema)
    }

    /// Create a parser from a shared encoder.
    pub fn from_arc(encoder: Arc<dyn Encoder>, schema: Object) -> Self {
        Self {
            encoder,
            schema,
            validator: None,
        }
    }

    /// Set the validator.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Set a shared validator.
    #[must_use]
    pub fn with_validator_arc(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The encoder used for decoding.
    #[must_use]
    pub fn encoder(&self) -> &Arc<dyn Encoder> {
        &self.encoder
    }

    /// The schema completions are checked against.
    #[must_use]
    pub fn schema(&self) -> &Object {
        &self.schema
    }

    /// Parse a completion.
    #[must_use]
    pub fn parse(&self, text: &str) -> Extraction {
        let data = match self.encoder.decode(text) {
            Ok(data) => data,
            Err(e) => {
                warn!(encoder = self.encoder.name(), error = %e, "Failed to decode completion");
                return Extraction::empty(text).with_error(e);
            }
        };

        let root = self.schema.id().as_str();
        let Some(obj_data) = data.get(root) else {
            if is_blank(&data) {
                debug!(root, "Nothing extracted");
                return Extraction::empty(text);
            }
            warn!(root, "Decoded data does not match the schema root");
            return Extraction::empty(text).with_error(ParseError::schema_mismatch(root));
        };

        let (validated_data, errors) = match &self.validator {
            Some(validator) => {
                let (cleaned, errors) = validator.clean_data(obj_data);
                (
                    cleaned.unwrap_or_else(empty_map),
                    errors.into_iter().map(OutputError::from).collect(),
                )
            }
            None => (empty_map(), Vec::new()),
        };

        debug!(root, errors = errors.len(), "Parsed completion");
        Extraction {
            raw: text.to_string(),
            data,
            validated_data,
            errors,
        }
    }
}

/// Decoders report "nothing" as `{}`; a bare `null` counts as nothing too.
fn is_blank(data: &JsonValue) -> bool {
    match data {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::json::JsonEncoder;
    use crate::validator::{FnValidator, SerdeValidator};
    use crate::xml::XmlEncoder;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use strex_core::{Number, Text};

    fn schema() -> Object {
        Object::new("obj")
            .unwrap()
            .with_attribute(Text::new("name").unwrap().with_example("Bob is here", "Bob"))
    }

    #[test]
    fn test_parse_end_to_end() {
        let parser = ExtractionParser::new(XmlEncoder::new(), schema());
        let extraction = parser.parse("<obj><name>Bob</name></obj>");
        assert_eq!(extraction.raw, "<obj><name>Bob</name></obj>");
        assert_eq!(extraction.data, json!({"obj": [{"name": ["Bob"]}]}));
        assert_eq!(extraction.validated_data, json!({}));
        assert!(extraction.errors.is_empty());
    }

    #[test]
    fn test_parse_nothing_decoded() {
        let parser = ExtractionParser::new(XmlEncoder::new(), schema());
        let extraction = parser.parse("I could not find anything.");
        assert!(extraction.is_empty());
        assert!(!extraction.has_errors());
    }

    #[test]
    fn test_parse_schema_mismatch() {
        let parser = ExtractionParser::new(XmlEncoder::new(), schema());
        let extraction = parser.parse("<person><name>Bob</name></person>");
        assert_eq!(extraction.data, json!({}));
        assert_eq!(extraction.errors.len(), 1);
        assert!(matches!(
            &extraction.errors[0],
            OutputError::Parse(ParseError::SchemaMismatch { expected }) if expected == "obj"
        ));
    }

    #[test]
    fn test_parse_decode_error_is_captured() {
        let parser = ExtractionParser::new(JsonEncoder::new(), schema());
        let extraction = parser.parse("<json>{not json</json>");
        assert_eq!(extraction.data, json!({}));
        assert_eq!(extraction.validated_data, json!({}));
        assert!(extraction.errors[0].is_parse());
    }

    #[test]
    fn test_parse_malformed_tags_is_captured() {
        let parser = ExtractionParser::new(XmlEncoder::new(), schema());
        let extraction = parser.parse("Sure! <obj><name>Bob</name></obj>");
        assert!(extraction.is_empty());
        assert_eq!(extraction.errors.len(), 1);
        assert!(matches!(
            &extraction.errors[0],
            OutputError::Parse(ParseError::MalformedTags { .. })
        ));
    }

    #[test]
    fn test_parse_with_fn_validator() {
        let validator = FnValidator::new(|data: &JsonValue| {
            data.get(0)
                .and_then(|item| item.get("name"))
                .cloned()
                .ok_or_else(|| ValidationError::failed("no name"))
        });
        let parser = ExtractionParser::new(XmlEncoder::new(), schema()).with_validator(validator);

        let extraction = parser.parse("<obj><name>Bob</name></obj>");
        assert_eq!(extraction.validated_data, json!(["Bob"]));

        let extraction = parser.parse("<obj><age>3</age></obj>");
        assert_eq!(extraction.validated_data, json!({}));
        assert!(extraction.errors[0].is_validation());
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Toy {
        name: String,
        price: f64,
    }

    #[test]
    fn test_parse_with_serde_validator_partial_success() {
        let schema = Object::new("toy")
            .unwrap()
            .with_many(true)
            .with_attribute(Text::new("name").unwrap())
            .with_attribute(Number::new("price").unwrap());
        let parser = ExtractionParser::new(XmlEncoder::new(), schema.clone())
            .with_validator(SerdeValidator::<Toy>::for_schema(schema));

        let extraction = parser.parse(
            "<toy><name>ball</name><price>2</price></toy>\
             <toy><name>kite</name><price>free</price></toy>",
        );
        assert_eq!(extraction.validated_data, json!([{"name": "ball", "price": 2.0}]));
        assert_eq!(extraction.errors.len(), 1);
        assert!(extraction.errors[0].is_validation());
    }

    #[test]
    fn test_extraction_serializes_errors_as_strings() {
        let extraction = Extraction::empty("x").with_error(ParseError::custom("boom"));
        assert_eq!(
            serde_json::to_value(&extraction).unwrap(),
            json!({
                "raw": "x",
                "data": {},
                "validated_data": {},
                "errors": ["Parse error: boom"]
            })
        );
    }
}
