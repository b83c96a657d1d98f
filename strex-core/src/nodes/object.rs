//! Composite object node.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{impl_node_common, Example, NodeKind, SchemaNode};
use crate::errors::Result;
use crate::identifier::NodeId;
use crate::visitor::Visitor;

/// A composite node owning an ordered list of attributes.
///
/// Attribute order is significant: it drives prompt descriptions and
/// example aggregation.
///
/// # Example
///
/// ```rust
/// use strex_core::{Number, Object, Text};
///
/// let person = Object::new("person")
///     .unwrap()
///     .with_description("Personal information")
///     .with_attribute(Text::new("name").unwrap())
///     .with_attribute(Number::new("age").unwrap());
///
/// assert_eq!(person.attributes().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    id: NodeId,
    #[serde(default)]
    description: String,
    #[serde(default)]
    many: bool,
    #[serde(default)]
    attributes: Vec<SchemaNode>,
    #[serde(default)]
    examples: Vec<Example>,
}

impl Object {
    /// Create an empty object with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`](crate::SchemaError) if the
    /// id is invalid.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: NodeId::new(id)?,
            description: String::new(),
            many: false,
            attributes: Vec::new(),
            examples: Vec::new(),
        })
    }

    /// The attributes, in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[SchemaNode] {
        &self.attributes
    }

    /// Worked examples attached directly to this object.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<SchemaNode>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Append several attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = SchemaNode>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Add a worked example.
    #[must_use]
    pub fn with_example(mut self, text: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.examples.push(Example::new(text, value));
        self
    }

    /// Add several worked examples.
    #[must_use]
    pub fn with_examples(mut self, examples: impl IntoIterator<Item = Example>) -> Self {
        self.examples.extend(examples);
        self
    }

    /// Find a direct attribute by id.
    #[must_use]
    pub fn attribute(&self, id: &str) -> Option<&SchemaNode> {
        self.attributes.iter().find(|a| a.id() == id)
    }

    /// Dispatch to the visitor.
    pub fn accept<V, C>(&self, visitor: &V, ctx: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        visitor.visit_object(self, ctx)
    }
}

impl_node_common!(Object, NodeKind::Object);
