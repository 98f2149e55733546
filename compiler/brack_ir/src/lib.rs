//! In-memory tree for brack markup.
//!
//! A [`Node`] owns its first child and its next sibling, forming a
//! child/sibling binary tree. A [`Tree`] owns the root node together with
//! the nesting depth the parser observed; that depth sizes the bounded
//! stacks used by the [`walk`] module, which renders and releases trees
//! without native recursion.

mod node;
mod tree;
pub mod walk;

pub use node::{Attribute, Children, Node};
pub use tree::Tree;
pub use walk::{Released, RenderError};
