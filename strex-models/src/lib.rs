//! # strex-models
//!
//! The completion model seam for strex.
//!
//! Extraction needs exactly one thing from a language model: given a prompt,
//! return a completion. This crate defines that contract as
//! [`CompletionModel`], plus [`MockModel`] and [`FunctionModel`] for tests
//! and local experiments. Provider clients live outside this workspace and
//! implement the trait.
//!
//! ## Example
//!
//! ```rust
//! use strex_models::{CompletionModel, FunctionModel, PromptInput};
//!
//! # tokio_test::block_on(async {
//! let model = FunctionModel::constant_text("<person><name>Alice</name></person>");
//! let completion = model.complete(&PromptInput::text("Alice")).await.unwrap();
//! assert!(completion.starts_with("<person>"));
//! # });
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod mock;
pub mod model;

pub use error::ModelError;
pub use mock::{FunctionDef, FunctionModel, MockModel};
pub use model::{BoxedModel, CompletionModel, PromptInput};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::error::ModelError;
    pub use crate::mock::{FunctionModel, MockModel};
    pub use crate::model::{BoxedModel, CompletionModel, PromptInput};
}
