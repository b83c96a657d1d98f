//! Few-shot example aggregation.
//!
//! Every node in a schema can carry worked examples, scoped to that node.
//! Aggregation walks the whole tree once and re-namespaces each example
//! under every ancestor's id, so each output is a complete mapping rooted
//! at the top-level node:
//!
//! ```text
//! Object "person" > Object "address" > Text "city" ("I live in Paris", "Paris")
//!
//! ("I live in Paris", {"person": {"address": {"city": "Paris"}}})
//! ```
//!
//! Outputs that carry no value collapse to `{}` at every level, the
//! canonical "nothing to extract" example.

use serde_json::{Map, Value as JsonValue};
use strex_core::{
    is_empty_value, Bool, Example, NodeId, NodeRef, Number, Object, Selection, Text, Visitor,
};
use strex_output::Encoder;
use tracing::debug;

use crate::error::{PromptError, Result};
use crate::formatter::InputFormatter;

/// An example rendered for the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedExample {
    /// The formatted example input.
    pub input: String,
    /// The example output in the encoder's wire format.
    pub output: String,
}

/// Collect every example in the tree below `node`.
///
/// Order is stable: an object's own examples first, then its attributes in
/// declared order. A selection yields its own examples, then its options'
/// examples, then its null examples.
///
/// # Errors
///
/// Returns [`PromptError::UnexpectedNode`] when called on a
/// [`SelectionOption`](strex_core::SelectionOption), which only has meaning
/// inside its selection.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_core::{Object, Text};
/// use strex_prompt::generate_examples;
///
/// let object = Object::new("object")
///     .unwrap()
///     .with_attribute(Text::new("number").unwrap().with_example("two", "2"));
///
/// let examples = generate_examples(&object).unwrap();
/// assert_eq!(examples[0].text, "two");
/// assert_eq!(examples[0].value, json!({"object": {"number": "2"}}));
/// ```
pub fn generate_examples<'a>(node: impl Into<NodeRef<'a>>) -> Result<Vec<Example>> {
    let examples = node.into().accept(&ExampleAggregator, ())?;
    debug!(count = examples.len(), "Aggregated examples");
    Ok(examples)
}

/// Format example inputs and encode example outputs.
///
/// # Errors
///
/// Returns [`PromptError::Encode`] if an output has no representation in the
/// encoder's format.
pub fn encode_examples(
    examples: &[Example],
    encoder: &dyn Encoder,
    formatter: &InputFormatter,
) -> Result<Vec<EncodedExample>> {
    examples
        .iter()
        .map(|example| {
            Ok(EncodedExample {
                input: formatter.format(&example.text),
                output: encoder.encode(&example.value)?,
            })
        })
        .collect()
}

/// Visitor behind [`generate_examples`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleAggregator;

impl ExampleAggregator {
    /// Key `value` under `id`, list-wrapping it for repeatable nodes.
    fn assemble(id: &NodeId, many: bool, value: &JsonValue) -> JsonValue {
        if is_empty_value(value) {
            return JsonValue::Object(Map::new());
        }
        let value = match value {
            JsonValue::Array(_) => value.clone(),
            other if many => JsonValue::Array(vec![other.clone()]),
            other => other.clone(),
        };
        let mut map = Map::new();
        map.insert(id.to_string(), value);
        JsonValue::Object(map)
    }

    fn leaf(id: &NodeId, many: bool, examples: &[Example]) -> Vec<Example> {
        examples
            .iter()
            .map(|example| {
                Example::new(example.text.clone(), Self::assemble(id, many, &example.value))
            })
            .collect()
    }
}

impl Visitor for ExampleAggregator {
    type Output = Result<Vec<Example>>;

    fn visit_text(&self, node: &Text, _ctx: ()) -> Self::Output {
        Ok(Self::leaf(node.id(), node.is_many(), node.examples()))
    }

    fn visit_number(&self, node: &Number, _ctx: ()) -> Self::Output {
        Ok(Self::leaf(node.id(), node.is_many(), node.examples()))
    }

    fn visit_bool(&self, node: &Bool, _ctx: ()) -> Self::Output {
        Ok(Self::leaf(node.id(), node.is_many(), node.examples()))
    }

    fn visit_selection(&self, node: &Selection, _ctx: ()) -> Self::Output {
        let mut examples = Self::leaf(node.id(), node.is_many(), node.examples());

        for option in node.options() {
            let value = JsonValue::String(option.id().to_string());
            for text in option.examples() {
                examples.push(Example::new(
                    text.clone(),
                    Self::assemble(node.id(), node.is_many(), &value),
                ));
            }
        }

        for text in node.null_examples() {
            examples.push(Example::new(text.clone(), JsonValue::Object(Map::new())));
        }
        Ok(examples)
    }

    fn visit_object(&self, node: &Object, _ctx: ()) -> Self::Output {
        let mut examples = Self::leaf(node.id(), node.is_many(), node.examples());

        for attribute in node.attributes() {
            for child in attribute.accept(self, ())? {
                let value = Self::assemble(node.id(), node.is_many(), &child.value);
                examples.push(Example::new(child.text, value));
            }
        }
        Ok(examples)
    }

    fn visit_default(&self, node: NodeRef<'_>, _ctx: ()) -> Self::Output {
        Err(PromptError::unexpected_node(node.kind(), node.id().as_str()))
    }
}
