//! Single-pass tree builder.
//!
//! Open nodes are owned either by `current` (the innermost one) or by the
//! ancestor stack. Children of an open node are prepended as they close
//! and put back in source order when their parent closes, so building
//! never needs a mutable path into the tree.
//!
//! Whatever is still held when the builder is dropped (open nodes, their
//! closed children, finished top-level nodes) goes through the iterative
//! teardown. Every early return therefore releases partial fragments the
//! same way.

use brack_ir::walk::{teardown_boxed, Released};
use brack_ir::{Attribute, Node, Tree};
use brack_lexer_core::{is_ident_byte, Scanner};
use brack_stack::BoundedStack;
use tracing::{debug, trace};

use crate::{ParseConfig, ParseError};

pub(crate) struct TreeBuilder<'a> {
    scanner: Scanner<'a>,
    config: ParseConfig,
    /// The enclosing parent of each open node; `None` for a top-level one.
    ancestors: BoundedStack<Option<Box<Node>>>,
    current: Option<Box<Node>>,
    /// Closed top-level nodes, in order.
    roots: Vec<Box<Node>>,
    /// Largest number of simultaneously open nodes.
    deepest: usize,
}

impl<'a> TreeBuilder<'a> {
    /// Check the document start and reserve the ancestor stack.
    pub(crate) fn new(mut scanner: Scanner<'a>, config: ParseConfig) -> Result<Self, ParseError> {
        scanner.skip_whitespace();
        if scanner.is_eof() {
            return Err(ParseError::EmptyInput);
        }
        if scanner.current() == b']' {
            return Err(ParseError::UnexpectedClose { pos: scanner.pos() });
        }
        if scanner.current() != b'[' {
            return Err(ParseError::ExpectedOpenBracket {
                found: scanner.current_char(),
                pos: scanner.pos(),
            });
        }

        let ancestors = BoundedStack::new(config.max_depth).map_err(ParseError::AncestorStack)?;
        Ok(TreeBuilder {
            scanner,
            config,
            ancestors,
            current: None,
            roots: Vec::new(),
            deepest: 0,
        })
    }

    pub(crate) fn run(mut self) -> Result<Tree, ParseError> {
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.is_eof() {
                break;
            }
            match self.scanner.current() {
                b'[' => self.open_node()?,
                b']' => self.close_node()?,
                byte if is_ident_byte(byte) => self.attribute()?,
                _ => return Err(self.unexpected_char()),
            }
        }

        if self.current.is_some() {
            return Err(ParseError::Unclosed {
                open: self.ancestors.len(),
                pos: self.scanner.end(),
            });
        }
        self.finish()
    }

    fn open_node(&mut self) -> Result<(), ParseError> {
        let start = self.scanner.pos();
        self.scanner.advance();
        self.scanner.skip_whitespace();
        let Some(name) = self.scanner.read_identifier() else {
            return Err(ParseError::ExpectedNodeName {
                pos: self.scanner.pos(),
            });
        };

        if self.current.is_none() && !self.roots.is_empty() && !self.config.allow_sibling_roots {
            return Err(ParseError::MultipleRoots { pos: start });
        }

        if let Err(overflow) = self.ancestors.push(self.current.take()) {
            self.current = overflow.into_inner();
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                pos: start,
            });
        }
        self.deepest = self.deepest.max(self.ancestors.len());
        trace!(pos = start, name, depth = self.ancestors.len(), "open node");
        self.current = Some(Box::new(Node::new(name)));
        Ok(())
    }

    fn close_node(&mut self) -> Result<(), ParseError> {
        let pos = self.scanner.pos();
        let Some(mut closed) = self.current.take() else {
            return Err(ParseError::UnexpectedClose { pos });
        };
        self.scanner.advance();
        closed.reverse_children();
        trace!(pos, name = closed.name(), "close node");

        // An open node always has a matching ancestor entry.
        match self.ancestors.pop() {
            Ok(Some(mut parent)) => {
                parent.prepend_child(closed);
                self.current = Some(parent);
            }
            Ok(None) | Err(_) => self.roots.push(closed),
        }
        Ok(())
    }

    fn attribute(&mut self) -> Result<(), ParseError> {
        let pos = self.scanner.pos();
        if self.current.is_none() {
            return Err(ParseError::AttributeOutsideNode { pos });
        }
        let Some(raw) = self.scanner.read_attribute()? else {
            return Err(self.unexpected_char());
        };
        trace!(pos, name = raw.name, value = %raw.value, "attribute");
        if let Some(node) = self.current.as_mut() {
            node.push_attribute(Attribute::new(raw.name, raw.value.into_owned()));
        }
        Ok(())
    }

    fn unexpected_char(&self) -> ParseError {
        ParseError::UnexpectedChar {
            found: self.scanner.current_char(),
            pos: self.scanner.pos(),
        }
    }

    fn finish(mut self) -> Result<Tree, ParseError> {
        let roots = std::mem::take(&mut self.roots);
        let count = roots.len();
        let tree = Tree::from_roots(roots, self.deepest).ok_or(ParseError::EmptyInput)?;
        debug!(depth = tree.depth(), top_level = count, "parsed document");
        Ok(tree)
    }
}

impl Drop for TreeBuilder<'_> {
    fn drop(&mut self) {
        let capacity = self.deepest.max(1);
        let mut released = Released::default();
        if let Some(node) = self.current.take() {
            released += teardown_boxed(node, capacity);
        }
        while let Ok(entry) = self.ancestors.pop() {
            if let Some(node) = entry {
                released += teardown_boxed(node, capacity);
            }
        }
        for node in self.roots.drain(..) {
            released += teardown_boxed(node, capacity);
        }
        if released.nodes > 0 {
            debug!(
                nodes = released.nodes,
                attributes = released.attributes,
                "released partial tree"
            );
        }
    }
}
