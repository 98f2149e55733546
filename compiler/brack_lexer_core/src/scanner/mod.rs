//! Scanner state: a cursor plus the whitespace and end-of-input rules of
//! brack markup.
//!
//! The token readers (`read_identifier`, `read_value`, `read_attribute`,
//! ...) are further `impl` blocks on [`Scanner`] in the `reader` module.

use crate::Cursor;

/// Cursor over brack source text.
#[derive(Clone, Copy, Debug)]
pub struct Scanner<'a> {
    pub(crate) cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the cursor's position.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Skip space, tab, newline, vertical tab, form feed and carriage return.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.cursor.eat_whitespace();
    }

    /// The byte under the cursor, or `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.cursor.current()
    }

    /// The full character under the cursor, for diagnostics.
    pub fn current_char(&self) -> char {
        self.cursor.current_char()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Zero-based byte offset of the cursor.
    #[inline]
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// Consume the byte under the cursor.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Byte offset of end of input.
    pub fn end(&self) -> usize {
        self.cursor.source_len()
    }
}
