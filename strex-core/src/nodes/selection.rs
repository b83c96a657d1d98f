//! Enumerated choice nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{impl_node_common, Example, NodeKind};
use crate::errors::Result;
use crate::identifier::NodeId;
use crate::visitor::Visitor;

/// Discriminator carried by persisted options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OptionTag {
    #[default]
    Option,
}

/// One choice of a [`Selection`].
///
/// Options only ever live inside a selection; they are never attributes of
/// an object. Examples are input texts that should select this option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOption {
    #[serde(rename = "type", default)]
    tag: OptionTag,
    id: NodeId,
    #[serde(default)]
    description: String,
    #[serde(default)]
    many: bool,
    #[serde(default)]
    examples: Vec<String>,
}

impl SelectionOption {
    /// Create an option with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`](crate::SchemaError) if the
    /// id is invalid.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        Ok(Self {
            tag: OptionTag::Option,
            id: NodeId::new(id)?,
            description: String::new(),
            many: false,
            examples: Vec::new(),
        })
    }

    /// Texts that should select this option.
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Add an example text.
    #[must_use]
    pub fn with_example(mut self, text: impl Into<String>) -> Self {
        self.examples.push(text.into());
        self
    }

    /// Dispatch to the visitor.
    pub fn accept<V, C>(&self, visitor: &V, ctx: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        visitor.visit_option(self, ctx)
    }
}

impl_node_common!(SelectionOption, NodeKind::Option);

/// A choice among a fixed set of [`SelectionOption`]s.
///
/// With `many` set, several options may be selected at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    id: NodeId,
    #[serde(default)]
    description: String,
    #[serde(default)]
    many: bool,
    #[serde(default)]
    options: Vec<SelectionOption>,
    #[serde(default)]
    examples: Vec<Example>,
    #[serde(default)]
    null_examples: Vec<String>,
}

impl Selection {
    /// Create an empty selection with the given id.
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
            options: Vec::new(),
            examples: Vec::new(),
            null_examples: Vec::new(),
        })
    }

    /// The options, in declaration order.
    #[must_use]
    pub fn options(&self) -> &[SelectionOption] {
        &self.options
    }

    /// Worked examples attached directly to the selection.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Texts for which nothing should be selected.
    #[must_use]
    pub fn null_examples(&self) -> &[String] {
        &self.null_examples
    }

    /// Append an option.
    #[must_use]
    pub fn with_option(mut self, option: SelectionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Append several options.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = SelectionOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Add a worked example.
    #[must_use]
    pub fn with_example(mut self, text: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.examples.push(Example::new(text, value));
        self
    }

    /// Add a text for which nothing should be selected.
    #[must_use]
    pub fn with_null_example(mut self, text: impl Into<String>) -> Self {
        self.null_examples.push(text.into());
        self
    }

    /// Find an option by id.
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&SelectionOption> {
        self.options.iter().find(|o| o.id() == id)
    }

    /// Dispatch to the visitor.
    pub fn accept<V, C>(&self, visitor: &V, ctx: C) -> V::Output
    where
        V: Visitor<C> + ?Sized,
    {
        visitor.visit_selection(self, ctx)
    }
}

impl_node_common!(Selection, NodeKind::Selection);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pets() -> Selection {
        Selection::new("pet")
            .unwrap()
            .with_description("Favorite pet")
            .with_option(SelectionOption::new("cat").unwrap().with_example("I like cats"))
            .with_option(SelectionOption::new("dog").unwrap())
            .with_null_example("I like turtles")
    }

    #[test]
    fn test_selection_builder() {
        let selection = pets();
        assert_eq!(selection.options().len(), 2);
        assert_eq!(selection.options()[0].id(), "cat");
        assert_eq!(selection.null_examples(), &["I like turtles".to_string()]);
        assert!(selection.option("dog").is_some());
        assert!(selection.option("bird").is_none());
    }

    #[test]
    fn test_option_serializes_type_tag() {
        let option = SelectionOption::new("cat").unwrap();
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["type"], json!("option"));
        assert_eq!(value["id"], json!("cat"));
    }

    #[test]
    fn test_option_rejects_other_tag() {
        let result = serde_json::from_value::<SelectionOption>(json!({
            "type": "text",
            "id": "cat"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_selection_roundtrip() {
        let selection = pets();
        let json = serde_json::to_string(&selection).unwrap();
        let parsed: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, selection);
    }
}
