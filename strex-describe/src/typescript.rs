//! TypeScript-like type descriptions.
//!
//! Renders a schema as a nested object-literal type inside a fenced code
//! block:
//!
//! ````text
//! ```TypeScript
//!
//! person: Array<{ // Personal information
//!  name: string // First name
//!  pet: ("cat" | "dog") // Favorite pet
//! }>
//! ```
//! ````
//!
//! Options are only rendered inside their selection's union, so describing
//! a bare [`SelectionOption`](strex_core::SelectionOption) is an error.

use strex_core::{Bool, NodeKind, NodeRef, Number, Object, Selection, SelectionOption, Text, Visitor};

use crate::descriptor::TypeDescriptor;
use crate::error::{DescribeError, Result};

/// Renders a schema as a TypeScript-like type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptDescriptor;

impl TypeScriptDescriptor {
    /// Create a new TypeScript descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn leaf(node: NodeRef<'_>, type_name: &str, depth: usize) -> Vec<String> {
        let type_name = if node.is_many() {
            format!("Array<{type_name}>")
        } else {
            type_name.to_string()
        };
        vec![format!(
            "{}{}: {} // {}",
            indent(depth),
            node.id(),
            type_name,
            node.description()
        )]
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth)
}

impl Visitor<usize> for TypeScriptDescriptor {
    type Output = Result<Vec<String>>;

    fn visit_text(&self, node: &Text, depth: usize) -> Self::Output {
        Ok(Self::leaf(NodeRef::Text(node), "string", depth))
    }

    fn visit_number(&self, node: &Number, depth: usize) -> Self::Output {
        Ok(Self::leaf(NodeRef::Number(node), "number", depth))
    }

    fn visit_bool(&self, node: &Bool, depth: usize) -> Self::Output {
        Ok(Self::leaf(NodeRef::Bool(node), "boolean", depth))
    }

    fn visit_selection(&self, node: &Selection, depth: usize) -> Self::Output {
        let union = node
            .options()
            .iter()
            .map(|option| format!("\"{}\"", option.id()))
            .collect::<Vec<_>>()
            .join(" | ");
        Ok(Self::leaf(NodeRef::Selection(node), &format!("({union})"), depth))
    }

    fn visit_option(&self, _node: &SelectionOption, _depth: usize) -> Self::Output {
        Err(DescribeError::not_implemented(
            NodeKind::Option,
            "options are rendered as part of their selection's union",
        ))
    }

    fn visit_object(&self, node: &Object, depth: usize) -> Self::Output {
        let space = indent(depth);
        let (open, close) = if node.is_many() {
            ("Array<{", "}>")
        } else {
            ("{", "}")
        };

        let mut lines = vec![format!(
            "{space}{}: {open} // {}",
            node.id(),
            node.description()
        )];
        for attribute in node.attributes() {
            lines.extend(attribute.accept(self, depth + 1)?);
        }
        lines.push(format!("{space}{close}"));
        Ok(lines)
    }

    fn visit_default(&self, node: NodeRef<'_>, _depth: usize) -> Self::Output {
        Err(DescribeError::not_implemented(
            node.kind(),
            "no TypeScript rendering for this node kind",
        ))
    }
}

impl TypeDescriptor for TypeScriptDescriptor {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn describe(&self, node: NodeRef<'_>) -> Result<String> {
        let lines = match node {
            NodeRef::Object(object) => object.accept(self, 0)?,
            NodeRef::Option(_) => node.accept(self, 0)?,
            NodeRef::Text(_) | NodeRef::Number(_) | NodeRef::Bool(_) | NodeRef::Selection(_) => {
                let mut lines = vec!["{".to_string()];
                lines.extend(node.accept(self, 1)?);
                lines.push("}".to_string());
                lines
            }
        };
        Ok(format!("```TypeScript\n\n{}\n```\n", lines.join("\n")))
    }
}
