//! Zero-terminated copy of the input.
//!
//! Brack readers stop on any byte that is not part of their token, and
//! `0x00` is never part of one. Appending a zero after the text lets every
//! reader loop run without checking the length first; trailing zeros up to
//! a 64-byte multiple keep one byte of lookahead in bounds as well.

use crate::Cursor;

/// Allocation granularity of the padded copy.
const PAD_TO: usize = 64;

/// Input text plus a zero-padded byte copy for the [`Cursor`].
///
/// ```text
/// buf: | text bytes ... | 0 | 0 0 ... 0 |
///      0           text.len()          multiple of 64
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer<'src> {
    /// Token slices borrow from this, not from `buf`.
    source: &'src str,
    buf: Vec<u8>,
}

impl<'src> SourceBuffer<'src> {
    pub fn new(source: &'src str) -> Self {
        let text = source.as_bytes();
        // At least one zero after the text, then round up.
        let size = (text.len() + PAD_TO) / PAD_TO * PAD_TO;
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(text);
        buf.resize(size, 0);
        Self { source, buf }
    }

    /// A cursor at the start of the input.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self.source, &self.buf)
    }
}
