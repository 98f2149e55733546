//! Owned tree with a recorded nesting depth.

use std::fmt;
use std::io::Write;

use brack_stack::StackError;
use tracing::debug;

use crate::node::Children;
use crate::walk::{self, Preorder, Released, RenderError};
use crate::Node;

/// A parsed document: the root node plus the deepest nesting level seen.
///
/// # Invariant
///
/// `depth` is at least the number of nested levels below and including
/// the root (the root alone is depth 1). The walkers size their stacks from
/// it, so a stack of strictly increasing levels never exceeds it.
pub struct Tree {
    root: Box<Node>,
    depth: usize,
}

impl Tree {
    /// Wrap `root`, whose nesting depth is at most `depth`.
    pub fn new(root: Box<Node>, depth: usize) -> Self {
        Tree {
            root,
            depth: depth.max(1),
        }
    }

    /// Link top-level nodes as siblings, in order, under one tree.
    ///
    /// Returns `None` when `roots` is empty.
    pub fn from_roots(roots: Vec<Box<Node>>, depth: usize) -> Option<Self> {
        let mut head: Option<Box<Node>> = None;
        for mut node in roots.into_iter().rev() {
            debug_assert!(node.next.is_none(), "top-level node already has siblings");
            node.next = head;
            head = Some(node);
        }
        head.map(|root| Tree::new(root, depth))
    }

    /// The first top-level node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The root followed by any top-level siblings.
    pub fn top_level(&self) -> Children<'_> {
        Children::starting_at(&self.root)
    }

    /// Upper bound on nesting depth; sizes the walk stacks.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pre-order walk yielding `(node, level)`, root at level 0.
    pub fn preorder(&self) -> Result<Preorder<'_>, StackError> {
        Preorder::new(self)
    }

    /// Write the indented listing of this tree to `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        walk::render(Some(self), out)
    }

    /// Free every node and attribute, reporting how many were released.
    pub fn release(mut self) -> Released {
        let released = walk::teardown(&mut self.root, self.depth);
        debug!(
            nodes = released.nodes,
            attributes = released.attributes,
            "released tree"
        );
        released
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        // A bare leaf (always the case after `release`) drops without recursion.
        if self.root.child.is_some() || self.root.next.is_some() {
            walk::teardown(&mut self.root, self.depth);
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root.name())
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
