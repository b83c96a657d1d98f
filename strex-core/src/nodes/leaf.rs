//! Leaf value nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{impl_node_common, Example, NodeKind};
use crate::errors::Result;
use crate::identifier::NodeId;
use crate::visitor::Visitor;

macro_rules! leaf_node {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $visit:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            id: NodeId,
            #[serde(default)]
            description: String,
            #[serde(default)]
            many: bool,
            #[serde(default)]
            examples: Vec<Example>,
        }

        impl $name {
            /// Create a node with the given id.
            ///
            /// # Errors
            ///
            /// Returns [`SchemaError::InvalidIdentifier`](crate::SchemaError)
            /// if the id is invalid.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                Ok(Self {
                    id: NodeId::new(id)?,
                    description: String::new(),
                    many: false,
                    examples: Vec::new(),
                })
            }

            /// The worked examples attached to this node.
            #[must_use]
            pub fn examples(&self) -> &[Example] {
                &self.examples
            }

            /// Add a worked example.
            #[must_use]
            pub fn with_example(
                mut self,
                text: impl Into<String>,
                value: impl Into<JsonValue>,
            ) -> Self {
                self.examples.push(Example::new(text, value));
                self
            }

            /// Add several worked examples.
            #[must_use]
            pub fn with_examples(mut self, examples: impl IntoIterator<Item = Example>) -> Self {
                self.examples.extend(examples);
                self
            }

            /// Dispatch to the visitor.
            pub fn accept<V, C>(&self, visitor: &V, ctx: C) -> V::Output
            where
                V: Visitor<C> + ?Sized,
            {
                visitor.$visit(self, ctx)
            }
        }

        impl_node_common!($name, $kind);
    };
}

leaf_node!(
    /// Free-text field.
    Text,
    NodeKind::Text,
    visit_text
);

leaf_node!(
    /// Numeric field. Examples may hold integers or floats.
    Number,
    NodeKind::Number,
    visit_number
);

leaf_node!(
    /// Boolean field.
    Bool,
    NodeKind::Bool,
    visit_bool
);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_builder() {
        let node = Text::new("name")
            .unwrap()
            .with_description("The name")
            .with_many(true)
            .with_example("My name is Bob", "Bob");

        assert_eq!(node.id(), "name");
        assert_eq!(node.description(), "The name");
        assert!(node.is_many());
        assert_eq!(node.examples(), &[Example::new("My name is Bob", "Bob")]);
        assert_eq!(node.kind(), NodeKind::Text);
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert!(Number::new("Price").is_err());
        assert!(Bool::new("").is_err());
    }

    #[test]
    fn test_defaults_on_deserialize() {
        let node: Number = serde_json::from_value(json!({"id": "age"})).unwrap();
        assert_eq!(node.description(), "");
        assert!(!node.is_many());
        assert!(node.examples().is_empty());
    }

    #[test]
    fn test_serialize_fields() {
        let node = Bool::new("is_open")
            .unwrap()
            .with_example("The store is open", true);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "is_open",
                "description": "",
                "many": false,
                "examples": [["The store is open", true]]
            })
        );
    }
}
