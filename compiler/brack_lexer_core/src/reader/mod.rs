//! Token readers built on [`Scanner`].
//!
//! Each reader starts at the cursor and leaves it just past what it
//! consumed. "No match" results (`None`, empty string) never move the
//! cursor; failures leave it where scanning stopped.

use std::borrow::Cow;

use crate::{is_ident_byte, is_space, Cursor, Scanner};

/// Failure while reading a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// End of input reached before the closing quote.
    #[error("missing closing quote `{quote}`")]
    MissingClosingQuote { quote: char, pos: usize },
    /// A quoted read was requested where no opening quote stands.
    #[error("expected opening quote `{quote}`")]
    ExpectedQuote { quote: char, pos: usize },
}

impl ScanError {
    /// Byte offset where scanning stopped.
    pub fn pos(&self) -> usize {
        match *self {
            ScanError::MissingClosingQuote { pos, .. } | ScanError::ExpectedQuote { pos, .. } => {
                pos
            }
        }
    }
}

/// An attribute as it appears in the source.
///
/// `value` borrows from the source unless escapes had to be decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
}

impl<'a> Scanner<'a> {
    /// Read a maximal run of `[A-Za-z0-9_]`.
    ///
    /// Returns `None` without moving the cursor when the run is empty.
    pub fn read_identifier(&mut self) -> Option<&'a str> {
        let start = self.cursor.pos();
        self.cursor.eat_while(is_ident_byte);
        if self.cursor.pos() == start {
            None
        } else {
            Some(self.cursor.slice_from(start))
        }
    }

    /// Read a value delimited by `quote`.
    ///
    /// `\` makes the following character literal, whatever it is. The
    /// result borrows from the source when the value has no escapes.
    pub fn read_quoted_value(&mut self, quote: u8) -> Result<Cow<'a, str>, ScanError> {
        if self.cursor.is_eof() || self.cursor.current() != quote {
            return Err(ScanError::ExpectedQuote {
                quote: char::from(quote),
                pos: self.cursor.pos(),
            });
        }
        self.cursor.advance();

        let mut decoded: Option<String> = None;
        let mut segment_start = self.cursor.pos();
        loop {
            let found = self.cursor.skip_to_quote_delim(quote);
            if found == quote {
                let tail = self.cursor.slice_from(segment_start);
                self.cursor.advance();
                return Ok(match decoded {
                    Some(mut value) => {
                        value.push_str(tail);
                        Cow::Owned(value)
                    }
                    None => Cow::Borrowed(tail),
                });
            }
            if found == b'\\' {
                let value = decoded.get_or_insert_with(String::new);
                value.push_str(self.cursor.slice_from(segment_start));
                self.cursor.advance();
                if self.cursor.is_eof() {
                    break;
                }
                let escaped_start = self.cursor.pos();
                self.cursor.advance_char();
                value.push_str(self.cursor.slice_from(escaped_start));
                segment_start = self.cursor.pos();
                continue;
            }
            break;
        }

        Err(ScanError::MissingClosingQuote {
            quote: char::from(quote),
            pos: self.cursor.pos(),
        })
    }

    /// Read a maximal run of bytes that are not whitespace, `[` or `]`.
    ///
    /// An empty run yields `""`, not a failure.
    pub fn read_unquoted_value(&mut self) -> &'a str {
        let start = self.cursor.pos();
        self.cursor
            .eat_while(|b| b != 0 && !is_space(b) && b != b'[' && b != b']');
        self.cursor.slice_from(start)
    }

    /// Skip whitespace, then read a quoted or unquoted value.
    pub fn read_value(&mut self) -> Result<Cow<'a, str>, ScanError> {
        self.skip_whitespace();
        match self.cursor.current() {
            quote @ (b'"' | b'\'') => self.read_quoted_value(quote),
            _ => Ok(Cow::Borrowed(self.read_unquoted_value())),
        }
    }

    /// Read `name` or `name = value`.
    ///
    /// Returns `Ok(None)` with the cursor restored when no name is present,
    /// so callers can tell "no attribute here" from a malformed one. A name
    /// without `=` is a flag and gets the empty value.
    pub fn read_attribute(&mut self) -> Result<Option<RawAttribute<'a>>, ScanError> {
        let saved: Cursor<'a> = self.cursor;
        self.skip_whitespace();

        let Some(name) = self.read_identifier() else {
            self.cursor = saved;
            return Ok(None);
        };

        self.skip_whitespace();
        let value = if self.cursor.current() == b'=' {
            self.cursor.advance();
            self.read_value()?
        } else {
            Cow::Borrowed("")
        };

        Ok(Some(RawAttribute { name, value }))
    }
}
