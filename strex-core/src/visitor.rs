//! Double-dispatch over schema nodes.
//!
//! A [`Visitor`] has one method per node kind. Every method falls back to
//! [`Visitor::visit_default`], so a visitor that treats all kinds alike only
//! implements that one method. Visitors take `&self`: per-traversal state
//! such as indentation depth is threaded through the context parameter `C`
//! and results are returned, never accumulated in the visitor.
//!
//! # Example
//!
//! ```rust
//! use strex_core::{NodeRef, Object, Text, Visitor};
//!
//! struct CountNodes;
//!
//! impl Visitor for CountNodes {
//!     type Output = usize;
//!
//!     fn visit_object(&self, node: &Object, ctx: ()) -> usize {
//!         1 + node
//!             .attributes()
//!             .iter()
//!             .map(|a| a.accept(self, ctx))
//!             .sum::<usize>()
//!     }
//!
//!     fn visit_default(&self, _node: NodeRef<'_>, _ctx: ()) -> usize {
//!         1
//!     }
//! }
//!
//! let object = Object::new("person")
//!     .unwrap()
//!     .with_attribute(Text::new("name").unwrap());
//! assert_eq!(object.accept(&CountNodes, ()), 2);
//! ```

use crate::nodes::{Bool, NodeRef, Number, Object, Selection, SelectionOption, Text};

/// Visitor over schema nodes with a per-call context `C`.
pub trait Visitor<C = ()> {
    /// What each visit produces.
    type Output;

    /// Visit a text node.
    fn visit_text(&self, node: &Text, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Text(node), ctx)
    }

    /// Visit a number node.
    fn visit_number(&self, node: &Number, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Number(node), ctx)
    }

    /// Visit a bool node.
    fn visit_bool(&self, node: &Bool, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Bool(node), ctx)
    }

    /// Visit a selection node.
    fn visit_selection(&self, node: &Selection, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Selection(node), ctx)
    }

    /// Visit a selection option.
    fn visit_option(&self, node: &SelectionOption, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Option(node), ctx)
    }

    /// Visit an object node.
    fn visit_object(&self, node: &Object, ctx: C) -> Self::Output {
        self.visit_default(NodeRef::Object(node), ctx)
    }

    /// Fallback for every kind without a dedicated override.
    fn visit_default(&self, node: NodeRef<'_>, ctx: C) -> Self::Output;
}
