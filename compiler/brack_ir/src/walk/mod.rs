//! Iterative tree walks: pre-order traversal, rendering, and teardown.
//!
//! Every walk runs on a [`BoundedStack`] sized from [`Tree::depth`]
//! instead of the native call stack, so arbitrarily long sibling chains
//! and deep nesting cost heap slots, not stack frames.
//!
//! # Stack Bound
//!
//! Both walks pop an entry at level `L` and push its `next` (level `L`)
//! and then its `child` (level `L + 1`). Levels on the stack therefore
//! increase strictly from bottom to top, so the stack never holds more
//! entries than the tree has levels.

use std::io::{self, Write};
use std::ops::AddAssign;

use brack_stack::{BoundedStack, StackError};
use tracing::{debug, warn};

use crate::{Node, Tree};

/// Indentation emitted per nesting level by [`render`].
pub const INDENT: &str = "  ";

/// Failure while rendering a tree.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write rendering: {0}")]
    Io(#[from] io::Error),
    #[error("render stack: {0}")]
    Stack(#[from] StackError),
}

/// Pre-order iterator over `(node, level)` pairs.
///
/// Children are visited before following siblings, which is document
/// order. Yields one `Err` and stops if the tree is deeper than its
/// recorded depth.
pub struct Preorder<'t> {
    stack: BoundedStack<(&'t Node, usize)>,
    failed: bool,
}

impl<'t> Preorder<'t> {
    pub fn new(tree: &'t Tree) -> Result<Self, StackError> {
        let mut stack = BoundedStack::new(tree.depth())?;
        stack
            .push((tree.root(), 0))
            .map_err(|overflow| overflow.error())?;
        Ok(Preorder {
            stack,
            failed: false,
        })
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Result<(&'t Node, usize), StackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (node, level) = self.stack.pop().ok()?;

        // Sibling first so the child is popped (visited) first.
        let links = [(node.next.as_deref(), level), (node.child.as_deref(), level + 1)];
        for (link, link_level) in links {
            let Some(link) = link else { continue };
            if let Err(overflow) = self.stack.push((link, link_level)) {
                self.failed = true;
                return Some(Err(overflow.error()));
            }
        }
        Some(Ok((node, level)))
    }
}

/// Write an indented listing of `tree` to `out`.
///
/// ```text
/// Node: root
///   Attr: attr = "val"
///   Attr: flag (flag)
///   Node: child
/// ```
///
/// `None` renders the `(empty tree)` placeholder.
pub fn render<W: Write>(tree: Option<&Tree>, out: &mut W) -> Result<(), RenderError> {
    let Some(tree) = tree else {
        writeln!(out, "(empty tree)")?;
        return Ok(());
    };

    for item in tree.preorder()? {
        let (node, level) = item?;
        write_indent(out, level)?;
        writeln!(out, "Node: {}", node.name())?;
        for attr in node.attributes() {
            write_indent(out, level + 1)?;
            if attr.is_flag() {
                writeln!(out, "Attr: {} (flag)", attr.name())?;
            } else {
                writeln!(out, "Attr: {} = \"{}\"", attr.name(), attr.value())?;
            }
        }
    }
    Ok(())
}

fn write_indent<W: Write>(out: &mut W, level: usize) -> io::Result<()> {
    for _ in 0..level {
        out.write_all(INDENT.as_bytes())?;
    }
    Ok(())
}

/// Counts of records freed by a teardown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Released {
    pub nodes: usize,
    pub attributes: usize,
}

impl Released {
    fn record(&mut self, node: &mut Node) {
        self.nodes += 1;
        self.attributes += node.clear_attributes();
    }
}

impl AddAssign for Released {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.attributes += rhs.attributes;
    }
}

/// Free everything reachable from `root` through `child` and `next`, and
/// root's own attributes.
///
/// `root` is left as a bare leaf for its owner to drop; it is counted in
/// the result. `capacity` should be the tree's depth. If the stack cannot
/// be allocated, or the tree turns out deeper than `capacity`, the
/// remainder is released in place without a stack.
pub fn teardown(root: &mut Node, capacity: usize) -> Released {
    let mut released = Released::default();
    let pending = [root.next.take(), root.child.take()];
    released.record(root);

    let mut stack = match BoundedStack::new(capacity.max(1)) {
        Ok(stack) => stack,
        Err(err) => {
            warn!(%err, "teardown stack unavailable, releasing in place");
            for node in pending.into_iter().flatten() {
                release_in_place(node, &mut released);
            }
            return released;
        }
    };

    for node in pending.into_iter().flatten() {
        push_or_release(&mut stack, node, &mut released);
    }

    while let Ok(mut node) = stack.pop() {
        let links = [node.next.take(), node.child.take()];
        for link in links.into_iter().flatten() {
            push_or_release(&mut stack, link, &mut released);
        }
        released.record(&mut node);
        // `node` is unlinked now; dropping it frees only its own record.
    }

    released
}

/// [`teardown`] for a detached subtree held by value.
pub fn teardown_boxed(node: Box<Node>, capacity: usize) -> Released {
    let mut node = node;
    teardown(&mut node, capacity)
}

fn push_or_release(
    stack: &mut BoundedStack<Box<Node>>,
    node: Box<Node>,
    released: &mut Released,
) {
    if let Err(overflow) = stack.push(node) {
        debug!(
            capacity = overflow.capacity(),
            "teardown stack full, releasing subtree in place"
        );
        release_in_place(overflow.into_inner(), released);
    }
}

/// Stackless release by rotation.
///
/// While the current node has a child, the child is lifted above it: the
/// child's siblings become the node's children and the node becomes the
/// child's `next`. A node without a child is unlinked from its `next` and
/// freed. Each step frees a node or shortens a child link, so the loop
/// terminates, and no node is visited after it is freed.
fn release_in_place(node: Box<Node>, released: &mut Released) {
    let mut current = Some(node);
    while let Some(mut node) = current {
        match node.child.take() {
            Some(mut child) => {
                node.child = child.next.take();
                child.next = Some(node);
                current = Some(child);
            }
            None => {
                current = node.next.take();
                released.record(&mut node);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
