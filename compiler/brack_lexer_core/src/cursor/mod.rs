//! Byte cursor over a [`SourceBuffer`](crate::SourceBuffer).
//!
//! Reading past the text yields `0x00`. A `0x00` inside the text is input
//! like any other byte (the tree builder rejects it as an unexpected
//! character); only [`Cursor::is_eof`] distinguishes the two.

/// Position in a zero-terminated input.
///
/// `Copy`: readers that need to backtrack save the cursor and assign it
/// back.
///
/// # Invariant
///
/// `buf[source.len()] == 0x00` and every byte after it is `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    /// `source` bytes followed by zeros.
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, buf: &'a [u8]) -> Self {
        debug_assert!(
            source.len() < buf.len(),
            "buffer has no terminator"
        );
        debug_assert!(buf[source.len()] == 0, "terminator must be zero");
        Self {
            source,
            buf,
            pos: 0,
        }
    }

    /// Byte under the cursor; `0x00` at end of input.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos]
    }

    /// Returns the full character starting at the current position.
    ///
    /// Used for diagnostics. Returns `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.source
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Returns `true` if the cursor has reached end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source.len()
    }

    /// Byte offset from the start of the input.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Input length in bytes.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Input text in `start..end`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source and on character
    /// boundaries. Token readers only cut at ASCII delimiters or after a
    /// whole character, which guarantees this.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(
            end <= self.source.len(),
            "slice {start}..{end} runs past input of {} bytes",
            self.source.len()
        );
        debug_assert!(start <= end, "inverted slice {start}..{end}");
        &self.source[start..end]
    }

    /// Input text from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Consume bytes while `pred` holds.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos]) {
            self.pos += 1;
        }
    }

    /// Encoded length of the character whose first byte is `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> usize {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Consume one whole character, never stepping past end of input.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.buf[self.pos]);
        self.pos = (self.pos + width).min(self.source.len());
    }

    /// Advance over `isspace` bytes.
    ///
    /// The sentinel is not whitespace, so scanning stops at end of input.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        while crate::is_space(self.buf[self.pos]) {
            self.pos += 1;
        }
    }

    /// Advance to the next `quote` or `\` byte inside a quoted value.
    ///
    /// Returns the byte found, or `0` with the cursor at end of input when
    /// neither occurs in the rest of the source.
    pub fn skip_to_quote_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos..self.source.len()];
        if let Some(offset) = memchr::memchr2(quote, b'\\', remaining) {
            self.pos += offset;
            self.buf[self.pos]
        } else {
            self.pos = self.source.len();
            0
        }
    }
}
