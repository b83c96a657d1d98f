//! Schema-aware shaping of decoded data.
//!
//! The tag codec is schema-agnostic: every value decodes to a list of
//! strings or nested mappings. Shaping uses the schema to turn that into
//! what an application expects:
//!
//! - fields without `many` holding exactly one value are unwrapped to it;
//!   several values stay a list so validation can reject them
//! - number and bool fields are converted from text where possible
//! - keys that are not in the schema are kept as-is

use serde_json::{Map, Number as JsonNumber, Value as JsonValue};
use strex_core::{Bool, NodeRef, Number, Object, Selection, Text, Visitor};

/// Shape the decoded value of `object` using its schema.
///
/// `value` is what the decoder produced under the object's id, typically a
/// list of mappings.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_core::{Number, Object, Text};
/// use strex_output::shape::shape_by_schema;
///
/// let person = Object::new("person")
///     .unwrap()
///     .with_attribute(Text::new("name").unwrap())
///     .with_attribute(Number::new("age").unwrap());
///
/// let decoded = json!([{"name": ["Alice"], "age": ["30"]}]);
/// assert_eq!(
///     shape_by_schema(&person, &decoded),
///     json!({"name": "Alice", "age": 30})
/// );
/// ```
#[must_use]
pub fn shape_by_schema(object: &Object, value: &JsonValue) -> JsonValue {
    object.accept(&Shaper, value)
}

struct Shaper;

impl Shaper {
    /// Convert each decoded item. Unless `many`, a lone item is unwrapped.
    fn collect(
        many: bool,
        value: &JsonValue,
        convert: impl Fn(&JsonValue) -> JsonValue,
    ) -> JsonValue {
        let mut items: Vec<JsonValue> = match value {
            JsonValue::Array(items) => items.iter().map(&convert).collect(),
            JsonValue::Null => Vec::new(),
            other => vec![convert(other)],
        };
        if many {
            return JsonValue::Array(items);
        }
        match items.len() {
            0 => JsonValue::Null,
            1 => items.remove(0),
            _ => JsonValue::Array(items),
        }
    }

    fn to_number(value: &JsonValue) -> JsonValue {
        let JsonValue::String(s) = value else {
            return value.clone();
        };
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return JsonValue::Number(n.into());
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(JsonNumber::from_f64)
            .map_or_else(|| value.clone(), JsonValue::Number)
    }

    fn to_bool(value: &JsonValue) -> JsonValue {
        match value {
            JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => JsonValue::Bool(true),
                "false" => JsonValue::Bool(false),
                _ => value.clone(),
            },
            other => other.clone(),
        }
    }
}

impl<'v> Visitor<&'v JsonValue> for Shaper {
    type Output = JsonValue;

    fn visit_text(&self, node: &Text, value: &'v JsonValue) -> JsonValue {
        Self::collect(node.is_many(), value, JsonValue::clone)
    }

    fn visit_number(&self, node: &Number, value: &'v JsonValue) -> JsonValue {
        Self::collect(node.is_many(), value, Self::to_number)
    }

    fn visit_bool(&self, node: &Bool, value: &'v JsonValue) -> JsonValue {
        Self::collect(node.is_many(), value, Self::to_bool)
    }

    fn visit_selection(&self, node: &Selection, value: &'v JsonValue) -> JsonValue {
        Self::collect(node.is_many(), value, JsonValue::clone)
    }

    fn visit_object(&self, node: &Object, value: &'v JsonValue) -> JsonValue {
        Self::collect(node.is_many(), value, |item| {
            let JsonValue::Object(fields) = item else {
                return item.clone();
            };
            let shaped: Map<String, JsonValue> = fields
                .iter()
                .map(|(key, field)| {
                    let field = match node.attribute(key) {
                        Some(attribute) => attribute.accept(self, field),
                        None => field.clone(),
                    };
                    (key.clone(), field)
                })
                .collect();
            JsonValue::Object(shaped)
        })
    }

    fn visit_default(&self, _node: NodeRef<'_>, value: &'v JsonValue) -> JsonValue {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use strex_core::SelectionOption;

    fn schema() -> Object {
        Object::new("person")
            .unwrap()
            .with_many(true)
            .with_attribute(Text::new("name").unwrap())
            .with_attribute(Text::new("nickname").unwrap().with_many(true))
            .with_attribute(Number::new("age").unwrap())
            .with_attribute(Number::new("height").unwrap())
            .with_attribute(Bool::new("adult").unwrap())
            .with_attribute(
                Selection::new("pet")
                    .unwrap()
                    .with_many(true)
                    .with_option(SelectionOption::new("cat").unwrap()),
            )
            .with_attribute(
                Object::new("address")
                    .unwrap()
                    .with_attribute(Number::new("zip").unwrap()),
            )
    }

    #[test]
    fn test_shape_many_objects() {
        let decoded = json!([
            {
                "name": ["Alice"],
                "nickname": ["Al", "Ali"],
                "age": ["30"],
                "height": ["1.72"],
                "adult": ["True"],
                "pet": ["cat"],
                "address": [{"zip": ["75001"]}],
                "unknown": ["kept"]
            },
            {"name": ["Bob"], "age": ["unknown"]}
        ]);

        assert_eq!(
            shape_by_schema(&schema(), &decoded),
            json!([
                {
                    "name": "Alice",
                    "nickname": ["Al", "Ali"],
                    "age": 30,
                    "height": 1.72,
                    "adult": true,
                    "pet": ["cat"],
                    "address": {"zip": 75001},
                    "unknown": ["kept"]
                },
                {"name": "Bob", "age": "unknown"}
            ])
        );
    }

    #[test]
    fn test_shape_single_keeps_extra_values() {
        let object = Object::new("obj")
            .unwrap()
            .with_attribute(Text::new("name").unwrap());
        assert_eq!(
            shape_by_schema(&object, &json!([{"name": ["a"]}])),
            json!({"name": "a"})
        );
        assert_eq!(
            shape_by_schema(&object, &json!([{"name": ["a", "b"]}, {"name": ["c"]}])),
            json!([{"name": ["a", "b"]}, {"name": "c"}])
        );
    }

    #[test]
    fn test_shape_empty_is_null_or_empty_list() {
        let single = Object::new("obj").unwrap();
        assert_eq!(shape_by_schema(&single, &json!([])), JsonValue::Null);

        let many = Object::new("obj").unwrap().with_many(true);
        assert_eq!(shape_by_schema(&many, &JsonValue::Null), json!([]));
    }

    #[test]
    fn test_shape_passes_typed_json_through() {
        let object = Object::new("obj")
            .unwrap()
            .with_attribute(Number::new("n").unwrap())
            .with_attribute(Bool::new("b").unwrap());
        assert_eq!(
            shape_by_schema(&object, &json!({"n": 4, "b": false})),
            json!({"n": 4, "b": false})
        );
    }
}
