//! Low-level scanning for brack markup.
//!
//! - [`SourceBuffer`] copies the input into a zero-terminated buffer.
//! - [`Cursor`] walks that buffer byte by byte.
//! - [`Scanner`] adds whitespace skipping and end-of-input detection, and
//!   carries the token readers (identifiers, quoted and unquoted values,
//!   attributes).
//! - [`LineIndex`] maps byte offsets back to line and column for
//!   diagnostics.
//!
//! Nothing here allocates per token except quoted values that contain
//! escapes.

mod cursor;
mod line_index;
mod reader;
mod scanner;
mod source_buffer;

pub use cursor::Cursor;
pub use line_index::LineIndex;
pub use reader::{RawAttribute, ScanError};
pub use scanner::Scanner;
pub use source_buffer::SourceBuffer;

/// Classic C `isspace` classification: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Bytes allowed in node and attribute names: ASCII letters, digits, `_`.
#[inline]
pub fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
