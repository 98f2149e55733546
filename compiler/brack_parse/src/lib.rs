//! Parser for brack markup.
//!
//! ```text
//! [config debug [server host=localhost port=8080 [tls]] [client]]
//! ```
//!
//! A document is one bracketed node. A node has a name, then attributes
//! (`name`, `name=value`, `name="quoted value"`) and child nodes in any
//! order. Parsing is a single left-to-right pass that tracks open nodes on
//! a [`BoundedStack`](brack_stack::BoundedStack), so nesting depth is
//! capped by [`ParseConfig::max_depth`] rather than by the native stack.

mod builder;
mod config;
mod error;

pub use config::{ParseConfig, DEFAULT_MAX_DEPTH};
pub use error::{ErrorKind, ParseError};

use brack_ir::Tree;
use brack_lexer_core::{Scanner, SourceBuffer};
use tracing::debug;

use crate::builder::TreeBuilder;

/// Parse `source` with the default configuration.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    parse_with(source, &ParseConfig::default())
}

/// Parse `source` into a [`Tree`].
///
/// On failure every node built so far has already been released.
pub fn parse_with(source: &str, config: &ParseConfig) -> Result<Tree, ParseError> {
    debug!(
        len = source.len(),
        max_depth = config.max_depth,
        sibling_roots = config.allow_sibling_roots,
        "parsing document"
    );
    let buffer = SourceBuffer::new(source);
    let scanner = Scanner::new(buffer.cursor());
    let result = TreeBuilder::new(scanner, *config).and_then(TreeBuilder::run);
    if let Err(err) = &result {
        debug!(code = err.code(), pos = ?err.pos(), %err, "parse failed");
    }
    result
}
