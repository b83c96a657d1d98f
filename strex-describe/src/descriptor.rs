//! The type descriptor seam and the built-in descriptor registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use strex_core::NodeRef;

use crate::bullet::BulletPointDescriptor;
use crate::error::{DescribeError, Result};
use crate::typescript::TypeScriptDescriptor;

/// Renders a schema node into a prompt-embeddable type description.
///
/// Implementations must be deterministic: the same tree always renders to
/// the same string.
pub trait TypeDescriptor: Send + Sync {
    /// Short name of this descriptor.
    fn name(&self) -> &'static str;

    /// Render the description for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::NotImplemented`] if the node (or one of its
    /// descendants) has no rendering in this format.
    fn describe(&self, node: NodeRef<'_>) -> Result<String>;
}

impl<T: TypeDescriptor + ?Sized> TypeDescriptor for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn describe(&self, node: NodeRef<'_>) -> Result<String> {
        (**self).describe(node)
    }
}

impl<T: TypeDescriptor + ?Sized> TypeDescriptor for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn describe(&self, node: NodeRef<'_>) -> Result<String> {
        (**self).describe(node)
    }
}

/// Built-in type descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    /// [`TypeScriptDescriptor`].
    #[default]
    #[serde(alias = "type_script")]
    Typescript,
    /// [`BulletPointDescriptor`].
    BulletPoint,
}

impl DescriptorKind {
    /// Get all built-in descriptor kinds.
    #[must_use]
    pub fn all() -> &'static [DescriptorKind] {
        &[Self::Typescript, Self::BulletPoint]
    }

    /// The canonical name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::BulletPoint => "bullet_point",
        }
    }

    /// Build the descriptor for this kind.
    #[must_use]
    pub fn descriptor(&self) -> Arc<dyn TypeDescriptor> {
        match self {
            Self::Typescript => Arc::new(TypeScriptDescriptor::new()),
            Self::BulletPoint => Arc::new(BulletPointDescriptor::new()),
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DescriptorKind {
    type Err = DescribeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "typescript" | "type_script" => Ok(Self::Typescript),
            "bullet_point" | "bullet" => Ok(Self::BulletPoint),
            _ => Err(DescribeError::UnknownDescriptor(s.to_string())),
        }
    }
}

/// Render `node` with the descriptor named by `kind`.
///
/// # Errors
///
/// See [`TypeDescriptor::describe`].
pub fn describe<'a>(kind: DescriptorKind, node: impl Into<NodeRef<'a>>) -> Result<String> {
    kind.descriptor().describe(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strex_core::{Object, Text};

    #[rstest]
    #[case("typescript", DescriptorKind::Typescript)]
    #[case("TypeScript", DescriptorKind::Typescript)]
    #[case("bullet_point", DescriptorKind::BulletPoint)]
    #[case("bullet-point", DescriptorKind::BulletPoint)]
    fn test_from_str(#[case] input: &str, #[case] expected: DescriptorKind) {
        assert_eq!(input.parse::<DescriptorKind>().unwrap(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "yaml".parse::<DescriptorKind>().unwrap_err();
        assert!(matches!(err, DescribeError::UnknownDescriptor(ref s) if s == "yaml"));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DescriptorKind::BulletPoint).unwrap();
        assert_eq!(json, "\"bullet_point\"");
        let kind: DescriptorKind = serde_json::from_str("\"typescript\"").unwrap();
        assert_eq!(kind, DescriptorKind::Typescript);
    }

    #[test]
    fn test_descriptor_names_match_kind() {
        for kind in DescriptorKind::all() {
            assert_eq!(kind.descriptor().name(), kind.as_str());
        }
    }

    #[test]
    fn test_describe_helper() {
        let object = Object::new("obj")
            .unwrap()
            .with_description("Things")
            .with_attribute(Text::new("name").unwrap().with_description("Name"));
        let bullet = describe(DescriptorKind::BulletPoint, &object).unwrap();
        assert_eq!(bullet, "* obj: Object # Things\n * name: Text # Name");
        let ts = describe(DescriptorKind::Typescript, &object).unwrap();
        assert!(ts.starts_with("```TypeScript\n\nobj: { // Things\n"));
    }
}
