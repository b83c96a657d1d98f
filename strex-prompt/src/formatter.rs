//! Input text formatting.
//!
//! Long inputs read better to a model when they are fenced off from the
//! surrounding prompt. The same formatter is applied to example inputs and
//! to the live input so they look alike.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::PromptError;

/// Signature of a custom formatter.
pub type FormatFn = dyn Fn(&str) -> String + Send + Sync;

/// How input text is presented in the prompt.
#[derive(Clone, Default)]
pub enum InputFormatter {
    /// Use the text as-is. Best for single sentences or short paragraphs.
    #[default]
    None,
    /// Surround the text with `"""` lines.
    TripleQuotes,
    /// Like [`TripleQuotes`](Self::TripleQuotes) with a `Text: ` prefix.
    TextPrefix,
    /// A user-provided function.
    Custom(Arc<FormatFn>),
}

impl InputFormatter {
    /// Create a custom formatter.
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(func))
    }

    /// The canonical name of this formatter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TripleQuotes => "triple_quotes",
            Self::TextPrefix => "text_prefix",
            Self::Custom(_) => "custom",
        }
    }

    /// Format a piece of input text.
    #[must_use]
    pub fn format(&self, text: &str) -> String {
        match self {
            Self::None => text.to_string(),
            Self::TripleQuotes => format!("\"\"\"\n{text}\n\"\"\""),
            Self::TextPrefix => format!("Text: \"\"\"\n{text}\n\"\"\""),
            Self::Custom(func) => func(text),
        }
    }
}

impl fmt::Debug for InputFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputFormatter::{}", self.as_str())
    }
}

impl fmt::Display for InputFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for InputFormatter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            (Self::Custom(_), _) | (_, Self::Custom(_)) => false,
            _ => self.as_str() == other.as_str(),
        }
    }
}

impl FromStr for InputFormatter {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" | "" => Ok(Self::None),
            "triple_quotes" => Ok(Self::TripleQuotes),
            "text_prefix" => Ok(Self::TextPrefix),
            _ => Err(PromptError::UnknownFormatter(s.to_string())),
        }
    }
}

impl Serialize for InputFormatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InputFormatter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        match name {
            Some(name) => name.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InputFormatter::None, "hello")]
    #[case(InputFormatter::TripleQuotes, "\"\"\"\nhello\n\"\"\"")]
    #[case(InputFormatter::TextPrefix, "Text: \"\"\"\nhello\n\"\"\"")]
    fn test_format(#[case] formatter: InputFormatter, #[case] expected: &str) {
        assert_eq!(formatter.format("hello"), expected);
    }

    #[test]
    fn test_custom() {
        let formatter = InputFormatter::custom(|text| text.to_uppercase());
        assert_eq!(formatter.format("hello"), "HELLO");
        assert_eq!(formatter.as_str(), "custom");
        assert_eq!(formatter, formatter.clone());
    }

    #[rstest]
    #[case("none", InputFormatter::None)]
    #[case("triple_quotes", InputFormatter::TripleQuotes)]
    #[case("Text-Prefix", InputFormatter::TextPrefix)]
    fn test_from_str(#[case] input: &str, #[case] expected: InputFormatter) {
        assert_eq!(input.parse::<InputFormatter>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "long_text".parse::<InputFormatter>().unwrap_err();
        assert!(err.to_string().starts_with("Unknown input formatter: long_text"));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&InputFormatter::TextPrefix).unwrap();
        assert_eq!(json, "\"text_prefix\"");
        let parsed: InputFormatter = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, InputFormatter::None);
        assert!(serde_json::from_str::<InputFormatter>("\"custom\"").is_err());
    }
}
