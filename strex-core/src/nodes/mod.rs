//! Schema node model.
//!
//! A schema is a strict tree of nodes describing what to extract:
//!
//! - [`Object`] owns an ordered list of attribute nodes and is the only
//!   node kind with children.
//! - [`Text`], [`Number`] and [`Bool`] are leaf value nodes.
//! - [`Selection`] is an enumerated choice that owns [`SelectionOption`]s.
//!
//! Nodes are plain values. They are built once, up front, and every
//! algorithm in the workspace consumes them read-only. The closed set of
//! attribute kinds is [`SchemaNode`]; borrowed views over every kind,
//! options included, are [`NodeRef`].

mod leaf;
mod object;
mod selection;

pub use leaf::{Bool, Number, Text};
pub use object::Object;
pub use selection::{Selection, SelectionOption};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::errors::SchemaError;
use crate::identifier::NodeId;
use crate::visitor::Visitor;

/// A worked example: an input text and the value expected to be extracted.
///
/// Persisted as a two-element array `[text, value]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, JsonValue)", into = "(String, JsonValue)")]
pub struct Example {
    /// The input text.
    pub text: String,
    /// The expected extraction for that text.
    pub value: JsonValue,
}

impl Example {
    /// Create a new example.
    pub fn new(text: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// Whether the expected value means "nothing extracted".
    ///
    /// Null, blank strings, and empty lists or mappings are empty. `false`
    /// and `0` are real values.
    #[must_use]
    pub fn has_empty_value(&self) -> bool {
        is_empty_value(&self.value)
    }
}

impl From<(String, JsonValue)> for Example {
    fn from((text, value): (String, JsonValue)) -> Self {
        Self { text, value }
    }
}

impl From<Example> for (String, JsonValue) {
    fn from(example: Example) -> Self {
        (example.text, example.value)
    }
}

/// Whether an extraction value carries no information.
#[must_use]
pub fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Free text.
    Text,
    /// Numeric value.
    Number,
    /// Boolean value.
    Bool,
    /// Enumerated choice.
    Selection,
    /// One choice of a selection.
    Option,
    /// Composite node.
    Object,
}

impl NodeKind {
    /// The type name used in prompt descriptions (`"Text"`, `"Object"`, ...).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Bool => "Bool",
            Self::Selection => "Selection",
            Self::Option => "Option",
            Self::Object => "Object",
        }
    }

    /// The discriminator used in the persisted schema format.
    #[must_use]
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Selection => "selection",
            Self::Option => "option",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Generates the accessors and copy-on-write helpers shared by every node.
macro_rules! impl_node_common {
    ($node:ty, $kind:expr) => {
        impl $node {
            /// The node id.
            #[must_use]
            pub fn id(&self) -> &$crate::identifier::NodeId {
                &self.id
            }

            /// The free-text description used for prompt generation.
            #[must_use]
            pub fn description(&self) -> &str {
                &self.description
            }

            /// Whether the field may repeat.
            #[must_use]
            pub fn is_many(&self) -> bool {
                self.many
            }

            /// The kind of this node.
            #[must_use]
            pub fn kind(&self) -> $crate::nodes::NodeKind {
                $kind
            }

            /// Set the description.
            #[must_use]
            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.description = description.into();
                self
            }

            /// Set whether the field may repeat.
            #[must_use]
            pub fn with_many(mut self, many: bool) -> Self {
                self.many = many;
                self
            }

            /// Return a copy with the id and/or description overridden.
            ///
            /// The original node is left untouched. Used to re-id a
            /// predefined schema fragment when reusing it.
            ///
            /// # Errors
            ///
            /// Returns [`SchemaError::InvalidIdentifier`](crate::SchemaError)
            /// if the new id is invalid.
            pub fn replace(
                &self,
                id: Option<&str>,
                description: Option<&str>,
            ) -> $crate::errors::Result<Self> {
                let mut node = self.clone();
                if let Some(id) = id {
                    node.id = $crate::identifier::NodeId::new(id)?;
                }
                if let Some(description) = description {
                    node.description = description.to_string();
                }
                Ok(node)
            }
        }
    };
}

pub(crate) use impl_node_common;

/// An attribute node: any node that can appear in an [`Object`].
///
/// Persisted with an explicit `type` discriminator. A missing or unknown
/// discriminator fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaNode {
    /// Free text.
    Text(Text),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(Bool),
    /// Enumerated choice.
    Selection(Selection),
    /// Composite node.
    Object(Object),
}

impl SchemaNode {
    /// Borrow this node as a [`NodeRef`].
    #[must_use]
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Text(n) => NodeRef::Text(n),
            Self::Number(n) => NodeRef::Number(n),
            Self::Bool(n) => NodeRef::Bool(n),
            Self::Selection(n) => NodeRef::Selection(n),
            Self::Object(n) => NodeRef::Object(n),
        }
    }

    /// The node id.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        self.as_node_ref().id()
    }

    /// The node description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.as_node_ref().description()
    }

    /// Whether the field may repeat.
    #[must_use]
    pub fn is_many(&self) -> bool {
        self.as_node_ref().is_many()
    }

    /// The kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.as_node_ref().kind()
    }

    /// Get the object if this is an object node.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Return a copy with the id and/or description overridden.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`] if the new id is invalid.
    pub fn replace(&self, id: Option<&str>, description: Option<&str>) -> Result<Self, SchemaError> {
        Ok(match self {
            Self::Text(n) => Self::Text(n.replace(id, description)?),
            Self::Number(n) => Self::Number(n.replace(id, description)?),
            Self::Bool(n) => Self::Bool(n.replace(id, description)?),
            Self::Selection(n) => Self::Selection(n.replace(id, description)?),
            Self::Object(n) => Self::Object(n.replace(id, description)?),
        })
    }

    /// Dispatch to the visitor method for this node's kind.
    pub fn accept<V, C>(&self, visitor: &V, ctx: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        self.as_node_ref().accept(visitor, ctx)
    }
}

impl From<Text> for SchemaNode {
    fn from(node: Text) -> Self {
        Self::Text(node)
    }
}

impl From<Number> for SchemaNode {
    fn from(node: Number) -> Self {
        Self::Number(node)
    }
}

impl From<Bool> for SchemaNode {
    fn from(node: Bool) -> Self {
        Self::Bool(node)
    }
}

impl From<Selection> for SchemaNode {
    fn from(node: Selection) -> Self {
        Self::Selection(node)
    }
}

impl From<Object> for SchemaNode {
    fn from(node: Object) -> Self {
        Self::Object(node)
    }
}

/// A borrowed view of any node, options included.
///
/// Algorithms that must handle every kind match on this enum exhaustively,
/// so adding a kind is a compile error wherever it is not handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    /// Free text.
    Text(&'a Text),
    /// Numeric value.
    Number(&'a Number),
    /// Boolean value.
    Bool(&'a Bool),
    /// Enumerated choice.
    Selection(&'a Selection),
    /// One choice of a selection.
    Option(&'a SelectionOption),
    /// Composite node.
    Object(&'a Object),
}

impl<'a> NodeRef<'a> {
    /// The node id.
    #[must_use]
    pub fn id(&self) -> &'a NodeId {
        match *self {
            Self::Text(n) => n.id(),
            Self::Number(n) => n.id(),
            Self::Bool(n) => n.id(),
            Self::Selection(n) => n.id(),
            Self::Option(n) => n.id(),
            Self::Object(n) => n.id(),
        }
    }

    /// The node description.
    #[must_use]
    pub fn description(&self) -> &'a str {
        match *self {
            Self::Text(n) => n.description(),
            Self::Number(n) => n.description(),
            Self::Bool(n) => n.description(),
            Self::Selection(n) => n.description(),
            Self::Option(n) => n.description(),
            Self::Object(n) => n.description(),
        }
    }

    /// Whether the field may repeat.
    #[must_use]
    pub fn is_many(&self) -> bool {
        match *self {
            Self::Text(n) => n.is_many(),
            Self::Number(n) => n.is_many(),
            Self::Bool(n) => n.is_many(),
            Self::Selection(n) => n.is_many(),
            Self::Option(n) => n.is_many(),
            Self::Object(n) => n.is_many(),
        }
    }

    /// The node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Text(_) => NodeKind::Text,
            Self::Number(_) => NodeKind::Number,
            Self::Bool(_) => NodeKind::Bool,
            Self::Selection(_) => NodeKind::Selection,
            Self::Option(_) => NodeKind::Option,
            Self::Object(_) => NodeKind::Object,
        }
    }

    /// Dispatch to the visitor method for this node's kind.
    pub fn accept<V, C>(self, visitor: &V, ctx: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        match self {
            Self::Text(n) => visitor.visit_text(n, ctx),
            Self::Number(n) => visitor.visit_number(n, ctx),
            Self::Bool(n) => visitor.visit_bool(n, ctx),
            Self::Selection(n) => visitor.visit_selection(n, ctx),
            Self::Option(n) => visitor.visit_option(n, ctx),
            Self::Object(n) => visitor.visit_object(n, ctx),
        }
    }
}

impl<'a> From<&'a SchemaNode> for NodeRef<'a> {
    fn from(node: &'a SchemaNode) -> Self {
        node.as_node_ref()
    }
}

impl<'a> From<&'a Object> for NodeRef<'a> {
    fn from(node: &'a Object) -> Self {
        Self::Object(node)
    }
}

impl<'a> From<&'a Text> for NodeRef<'a> {
    fn from(node: &'a Text) -> Self {
        Self::Text(node)
    }
}

impl<'a> From<&'a Number> for NodeRef<'a> {
    fn from(node: &'a Number) -> Self {
        Self::Number(node)
    }
}

impl<'a> From<&'a Bool> for NodeRef<'a> {
    fn from(node: &'a Bool) -> Self {
        Self::Bool(node)
    }
}

impl<'a> From<&'a Selection> for NodeRef<'a> {
    fn from(node: &'a Selection) -> Self {
        Self::Selection(node)
    }
}

impl<'a> From<&'a SelectionOption> for NodeRef<'a> {
    fn from(node: &'a SelectionOption) -> Self {
        Self::Option(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_example_tuple_serde() {
        let example = Example::new("I bought a cookie", "cookie");
        let json = serde_json::to_value(&example).unwrap();
        assert_eq!(json, json!(["I bought a cookie", "cookie"]));

        let parsed: Example = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, example);
    }

    #[test]
    fn test_empty_values() {
        assert!(Example::new("x", "").has_empty_value());
        assert!(Example::new("x", "   ").has_empty_value());
        assert!(Example::new("x", json!([])).has_empty_value());
        assert!(Example::new("x", json!({})).has_empty_value());
        assert!(Example::new("x", JsonValue::Null).has_empty_value());
        assert!(!Example::new("x", false).has_empty_value());
        assert!(!Example::new("x", 0).has_empty_value());
        assert!(!Example::new("x", "0").has_empty_value());
    }

    #[test]
    fn test_node_kind_names() {
        assert_eq!(NodeKind::Selection.type_name(), "Selection");
        assert_eq!(NodeKind::Selection.discriminator(), "selection");
        assert_eq!(NodeKind::Bool.to_string(), "Bool");
    }

    #[test]
    fn test_schema_node_accessors() {
        let node: SchemaNode = Text::new("name")
            .unwrap()
            .with_description("A name")
            .with_many(true)
            .into();
        assert_eq!(node.id(), "name");
        assert_eq!(node.description(), "A name");
        assert!(node.is_many());
        assert_eq!(node.kind(), NodeKind::Text);
        assert!(node.as_object().is_none());
    }

    #[test]
    fn test_replace_is_copy_on_write() {
        let original: SchemaNode = Number::new("price")
            .unwrap()
            .with_description("Price")
            .into();
        let renamed = original.replace(Some("cost"), None).unwrap();

        assert_eq!(original.id(), "price");
        assert_eq!(renamed.id(), "cost");
        assert_eq!(renamed.description(), "Price");

        let redescribed = original.replace(None, Some("Unit price")).unwrap();
        assert_eq!(redescribed.id(), "price");
        assert_eq!(redescribed.description(), "Unit price");
    }

    #[test]
    fn test_replace_validates_id() {
        let original: SchemaNode = Bool::new("flag").unwrap().into();
        assert!(original.replace(Some("Flag!"), None).is_err());
    }

    #[test]
    fn test_unknown_discriminator_fails() {
        let result = serde_json::from_value::<SchemaNode>(json!({
            "type": "date",
            "id": "when"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_discriminator_fails() {
        let result = serde_json::from_value::<SchemaNode>(json!({"id": "when"}));
        assert!(result.is_err());
    }
}
