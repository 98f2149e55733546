//! Byte offset to line/column mapping for diagnostics.

/// Line start offsets of a source text.
#[derive(Clone, Debug)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset of the first byte of every line. Always starts with `0`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|nl| nl + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// 1-based line and column (in characters) of byte offset `pos`.
    ///
    /// Offsets past the end clamp to the end of input.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = self.floor_char_boundary(pos.min(self.source.len()));
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        let column = self.source[self.line_starts[line]..pos].chars().count() + 1;
        (line + 1, column)
    }

    /// Text of 1-based `line`, without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .map_or(self.source.len(), |&next| next - 1);
        Some(self.source[start..end].trim_end_matches('\r'))
    }

    fn floor_char_boundary(&self, mut pos: usize) -> usize {
        while !self.source.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
