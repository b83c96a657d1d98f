//! Persisted schema format.
//!
//! Schemas persist as JSON. Every attribute carries a `type` discriminator
//! (`"text"`, `"number"`, `"bool"`, `"selection"`, `"object"`) and options
//! carry `"option"`. The root object may omit its discriminator.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::errors::{Result, SchemaError};
use crate::nodes::{Bool, Example, NodeRef, Number, Object, SchemaNode, Selection, Text};
use crate::visitor::Visitor;

/// Borrowed root wrapper so the root object also carries its discriminator.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedRoot<'a> {
    Object(&'a Object),
}

/// Serialize a schema to a compact JSON string.
///
/// # Errors
///
/// Returns [`SchemaError::Serialize`] if serialization fails.
pub fn dumps(object: &Object) -> Result<String> {
    serde_json::to_string(&TaggedRoot::Object(object)).map_err(SchemaError::Serialize)
}

/// Serialize a schema to an indented JSON string.
///
/// # Errors
///
/// Returns [`SchemaError::Serialize`] if serialization fails.
pub fn dumps_pretty(object: &Object) -> Result<String> {
    serde_json::to_string_pretty(&TaggedRoot::Object(object)).map_err(SchemaError::Serialize)
}

/// Deserialize a schema from a JSON string.
///
/// Example values are checked against the kind of their node, so a number
/// field with a text example is rejected here rather than surfacing later.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] for malformed JSON, missing or
/// unknown discriminators and invalid ids,
/// [`SchemaError::UnsupportedNodeKind`] if the root is not an object, and
/// [`SchemaError::InvalidExample`] for mistyped examples.
pub fn loads(s: &str) -> Result<Object> {
    let value: JsonValue = serde_json::from_str(s).map_err(SchemaError::Deserialize)?;
    from_value(value)
}

/// Deserialize a schema from an already-parsed JSON value.
///
/// # Errors
///
/// See [`loads`].
pub fn from_value(value: JsonValue) -> Result<Object> {
    let has_tag = value.get("type").is_some();
    let object = if has_tag {
        match serde_json::from_value::<SchemaNode>(value).map_err(SchemaError::Deserialize)? {
            SchemaNode::Object(object) => object,
            other => {
                return Err(SchemaError::unsupported_node_kind(
                    other.kind().discriminator(),
                    "the root of a schema must be an object",
                ))
            }
        }
    } else {
        serde_json::from_value::<Object>(value).map_err(SchemaError::Deserialize)?
    };
    check_examples(&object)?;
    Ok(object)
}

/// Check that every example value in the tree matches its node's kind.
///
/// Null values are accepted everywhere. Repeatable shapes may also be given
/// as lists. Number examples may be strings holding a number, since models
/// read and write numbers as text.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidExample`] for the first mismatch found.
pub fn check_examples(object: &Object) -> Result<()> {
    object.accept(&ExampleChecker, ())
}

struct ExampleChecker;

impl ExampleChecker {
    fn check(
        id: &str,
        examples: &[Example],
        expected: &str,
        accepts: fn(&JsonValue) -> bool,
    ) -> Result<()> {
        for example in examples {
            let ok = match &example.value {
                JsonValue::Null => true,
                JsonValue::Array(items) => items.iter().all(accepts),
                value => accepts(value),
            };
            if !ok {
                return Err(SchemaError::invalid_example(
                    id,
                    expected,
                    example.value.to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn is_numeric(value: &JsonValue) -> bool {
    match value {
        JsonValue::Number(_) => true,
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    }
}

impl Visitor for ExampleChecker {
    type Output = Result<()>;

    fn visit_text(&self, node: &Text, _ctx: ()) -> Result<()> {
        Self::check(node.id().as_str(), node.examples(), "text", JsonValue::is_string)
    }

    fn visit_number(&self, node: &Number, _ctx: ()) -> Result<()> {
        Self::check(node.id().as_str(), node.examples(), "a number", is_numeric)
    }

    fn visit_bool(&self, node: &Bool, _ctx: ()) -> Result<()> {
        Self::check(node.id().as_str(), node.examples(), "a boolean", JsonValue::is_boolean)
    }

    fn visit_selection(&self, node: &Selection, _ctx: ()) -> Result<()> {
        Self::check(node.id().as_str(), node.examples(), "an option id", JsonValue::is_string)
    }

    fn visit_object(&self, node: &Object, ctx: ()) -> Result<()> {
        Self::check(node.id().as_str(), node.examples(), "a mapping", JsonValue::is_object)?;
        node.attributes()
            .iter()
            .try_for_each(|attribute| attribute.accept(self, ctx))
    }

    fn visit_default(&self, _node: NodeRef<'_>, _ctx: ()) -> Result<()> {
        Ok(())
    }
}
