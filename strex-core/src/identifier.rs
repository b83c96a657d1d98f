//! Validated node identifiers.
//!
//! Node ids become wire-format tag names and TypeScript property names, so
//! they are restricted to `^[a-z_][0-9a-z_]*$`. The restriction is enforced
//! once, when a [`NodeId`] is created, including during deserialization.

use serde::{Deserialize, Serialize};

use crate::errors::SchemaError;

/// Check whether a string is a valid node identifier.
///
/// # Example
///
/// ```rust
/// use strex_core::identifier::is_valid_identifier;
///
/// assert!(is_valid_identifier("first_name"));
/// assert!(is_valid_identifier("_n1"));
/// assert!(!is_valid_identifier("1name"));
/// assert!(!is_valid_identifier("Name"));
/// ```
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Type-safe wrapper for a schema node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id, validating it against the identifier pattern.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`] if the id is empty, starts
    /// with a digit, or contains anything other than lowercase letters,
    /// digits, and underscores.
    pub fn new(id: impl Into<String>) -> Result<Self, SchemaError> {
        let id = id.into();
        if is_valid_identifier(&id) {
            Ok(Self(id))
        } else {
            Err(SchemaError::invalid_identifier(id))
        }
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = SchemaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("name")]
    #[case("name_name")]
    #[case("_name")]
    #[case("n1ame")]
    #[case("_")]
    #[case("a0_9")]
    fn test_valid_ids(#[case] id: &str) {
        let node_id = NodeId::new(id).unwrap();
        assert_eq!(node_id.as_str(), id);
    }

    #[rstest]
    #[case("")]
    #[case("@@#")]
    #[case(" ")]
    #[case("NAME")]
    #[case("Name")]
    #[case("1name")]
    #[case("name-name")]
    #[case("name name")]
    #[case("naïve")]
    fn test_invalid_ids(#[case] id: &str) {
        let err = NodeId::new(id).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = NodeId::new("price").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"price\"");
        let parsed: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result = serde_json::from_str::<NodeId>("\"Price\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let id = NodeId::new("price").unwrap();
        assert_eq!(id, "price");
        assert_eq!(id.to_string(), "price");
    }
}
