//! Instruction templates.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the rendered type description.
pub const TYPE_DESCRIPTION: &str = "{type_description}";

/// Placeholder replaced by the encoder's format instructions.
pub const FORMAT_INSTRUCTIONS: &str = "{format_instructions}";

/// The instruction template used unless one is configured.
pub const DEFAULT_INSTRUCTION_TEMPLATE: &str = "Your goal is to extract structured information \
    from the user's input that matches the form described below. When extracting information \
    please make sure it matches the type information exactly. Do not add any attributes that \
    do not appear in the schema shown below.\n\n{type_description}\n\n{format_instructions}\n\n";

/// The instruction part of an extraction prompt.
///
/// Either placeholder may be left out of a custom template, in which case
/// that piece is simply not shown to the model.
///
/// # Example
///
/// ```rust
/// use strex_prompt::InstructionTemplate;
///
/// let template = InstructionTemplate::new("Schema:\n{type_description}");
/// assert_eq!(template.render("name: string", "Use tags."), "Schema:\nname: string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionTemplate {
    template: String,
}

impl Default for InstructionTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTION_TEMPLATE)
    }
}

impl InstructionTemplate {
    /// Create a template.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Whether the template shows the type description.
    #[must_use]
    pub fn uses_type_description(&self) -> bool {
        self.template.contains(TYPE_DESCRIPTION)
    }

    /// Whether the template shows the format instructions.
    #[must_use]
    pub fn uses_format_instructions(&self) -> bool {
        self.template.contains(FORMAT_INSTRUCTIONS)
    }

    /// Fill in the placeholders and trim surrounding whitespace.
    #[must_use]
    pub fn render(&self, type_description: &str, format_instructions: &str) -> String {
        self.template
            .replace(TYPE_DESCRIPTION, type_description)
            .replace(FORMAT_INSTRUCTIONS, format_instructions)
            .trim()
            .to_string()
    }
}

impl From<&str> for InstructionTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for InstructionTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}
