//! # strex-describe
//!
//! Type description renderers for strex schemas.
//!
//! A type description is the part of an extraction prompt that tells the
//! model exactly which fields exist, what type each one has, and what it
//! means. Two renderings are provided:
//!
//! - [`TypeScriptDescriptor`]: a nested TypeScript-like object type
//! - [`BulletPointDescriptor`]: an indented bullet list
//!
//! ## Example
//!
//! ```rust
//! use strex_core::{Object, Text};
//! use strex_describe::{describe, DescriptorKind};
//!
//! let object = Object::new("person")
//!     .unwrap()
//!     .with_description("A person")
//!     .with_attribute(Text::new("name").unwrap().with_description("Their name"));
//!
//! let ts = describe(DescriptorKind::Typescript, &object).unwrap();
//! assert_eq!(
//!     ts,
//!     "```TypeScript\n\nperson: { // A person\n name: string // Their name\n}\n```\n"
//! );
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod bullet;
pub mod descriptor;
pub mod error;
pub mod typescript;

pub use bullet::BulletPointDescriptor;
pub use descriptor::{describe, DescriptorKind, TypeDescriptor};
pub use error::{DescribeError, Result};
pub use typescript::TypeScriptDescriptor;
