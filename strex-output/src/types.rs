//! Decoded tag trees.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// A decoded tag frame: tag name to every value seen for it, in order.
pub type TagMap = IndexMap<String, Vec<TagValue>>;

/// A value decoded from one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// A leaf tag holding text.
    Text(String),
    /// A tag holding nested tags.
    Map(TagMap),
}

impl TagValue {
    /// Get the text if this is a leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Map(_) => None,
        }
    }

    /// Get the nested map if this is not a leaf.
    #[must_use]
    pub fn as_map(&self) -> Option<&TagMap> {
        match self {
            Self::Map(m) => Some(m),
            Self::Text(_) => None,
        }
    }

    /// Convert to JSON: text becomes a string, maps become objects of lists.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::Map(m) => tag_map_to_json(m),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<TagMap> for TagValue {
    fn from(m: TagMap) -> Self {
        Self::Map(m)
    }
}

/// Convert a decoded tag map to a JSON object whose values are all lists.
#[must_use]
pub fn tag_map_to_json(map: &TagMap) -> JsonValue {
    let object: Map<String, JsonValue> = map
        .iter()
        .map(|(key, values)| {
            (
                key.clone(),
                JsonValue::Array(values.iter().map(TagValue::to_json).collect()),
            )
        })
        .collect();
    JsonValue::Object(object)
}

/// The JSON type name of a value, for error messages.
#[must_use]
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_json_nests_lists() {
        let mut inner = TagMap::new();
        inner.insert("a1".into(), vec!["1".into()]);
        let mut outer = TagMap::new();
        outer.insert("a".into(), vec![TagValue::Map(inner)]);
        outer.insert("b".into(), vec!["2".into(), "3".into()]);

        assert_eq!(
            tag_map_to_json(&outer),
            json!({"a": [{"a1": ["1"]}], "b": ["2", "3"]})
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let mut map = TagMap::new();
        map.insert("name".into(), vec!["Bob".into()]);
        let value = TagValue::Map(map);
        assert_eq!(serde_json::to_value(&value).unwrap(), value.to_json());
    }

    #[test]
    fn test_accessors() {
        let text = TagValue::from("x");
        assert_eq!(text.as_text(), Some("x"));
        assert!(text.as_map().is_none());
    }
}
