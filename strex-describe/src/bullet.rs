//! Bullet point type descriptions.
//!
//! One line per node, depth-first and parent before children:
//!
//! ```text
//! * person: Object # Personal information
//!  * name: Text # First name
//!  * age: Number # Age in years
//! ```

use strex_core::{NodeRef, Object, Visitor};

use crate::descriptor::TypeDescriptor;
use crate::error::Result;

/// Renders a schema as an indented bullet list.
///
/// Selections are listed as a single line; their options are not expanded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulletPointDescriptor;

impl BulletPointDescriptor {
    /// Create a new bullet point descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn line(node: NodeRef<'_>, depth: usize) -> String {
        format!(
            "{}* {}: {} # {}",
            " ".repeat(depth),
            node.id(),
            node.kind().type_name(),
            node.description()
        )
    }
}

impl Visitor<usize> for BulletPointDescriptor {
    type Output = Vec<String>;

    fn visit_object(&self, node: &Object, depth: usize) -> Vec<String> {
        let mut lines = vec![Self::line(NodeRef::Object(node), depth)];
        for attribute in node.attributes() {
            lines.extend(attribute.accept(self, depth + 1));
        }
        lines
    }

    fn visit_default(&self, node: NodeRef<'_>, depth: usize) -> Vec<String> {
        vec![Self::line(node, depth)]
    }
}

impl TypeDescriptor for BulletPointDescriptor {
    fn name(&self) -> &'static str {
        "bullet_point"
    }

    fn describe(&self, node: NodeRef<'_>) -> Result<String> {
        Ok(node.accept(self, 0).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strex_core::{Number, SchemaNode, Selection, SelectionOption, Text};

    fn number() -> Number {
        Number::new("number")
            .unwrap()
            .with_description("Number Description")
            .with_example("number", "2")
    }

    fn text() -> Text {
        Text::new("text")
            .unwrap()
            .with_description("Text Description")
            .with_example("text", "3")
    }

    fn selection() -> Selection {
        Selection::new("selection")
            .unwrap()
            .with_description("Selection Description")
            .with_option(
                SelectionOption::new("option")
                    .unwrap()
                    .with_description("Option Description")
                    .with_example("selection"),
            )
            .with_null_example("foo")
    }

    fn object() -> Object {
        Object::new("object")
            .unwrap()
            .with_description("Object Description")
            .with_example("another number", serde_json::json!({"number": "1"}))
            .with_attribute(number())
            .with_attribute(text())
            .with_attribute(selection())
    }

    #[rstest]
    #[case::number(number().into(), "* number: Number # Number Description")]
    #[case::text(text().into(), "* text: Text # Text Description")]
    #[case::selection(selection().into(), "* selection: Selection # Selection Description")]
    fn test_leaf_descriptions(#[case] node: SchemaNode, #[case] expected: &str) {
        assert_eq!(BulletPointDescriptor.describe(node.as_node_ref()).unwrap(), expected);
    }

    #[test]
    fn test_object_description() {
        let object = object();
        assert_eq!(
            BulletPointDescriptor.describe(NodeRef::from(&object)).unwrap(),
            "* object: Object # Object Description\n\
             \x20* number: Number # Number Description\n\
             \x20* text: Text # Text Description\n\
             \x20* selection: Selection # Selection Description"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let root = Object::new("root")
            .unwrap()
            .with_description("Root")
            .with_attribute(
                Object::new("child")
                    .unwrap()
                    .with_description("Child")
                    .with_attribute(Text::new("leaf").unwrap().with_description("Leaf")),
            );
        assert_eq!(
            BulletPointDescriptor.describe(NodeRef::from(&root)).unwrap(),
            "* root: Object # Root\n * child: Object # Child\n  * leaf: Text # Leaf"
        );
    }

    #[test]
    fn test_option_renders_as_single_line() {
        let option = SelectionOption::new("cat").unwrap().with_description("A cat");
        assert_eq!(
            BulletPointDescriptor.describe(NodeRef::from(&option)).unwrap(),
            "* cat: Option # A cat"
        );
    }
}
