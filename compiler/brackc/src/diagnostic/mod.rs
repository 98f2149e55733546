//! Terminal diagnostics for parse failures.
//!
//! ```text
//! error[B0007]: unexpected character `!`
//!   --> doc.brack:1:7
//!    |
//!  1 | [root !]
//!    |       ^
//!   = note: syntax error
//! ```

use std::io::Write;

use brack_lexer_core::LineIndex;
use brack_parse::ParseError;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the value of `--color=`.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics to `W`, optionally with ANSI colors.
///
/// Write failures are ignored: there is nowhere left to report them.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, code: Option<&str>, message: &str) {
        self.write_colored("error", colors::ERROR);
        if let Some(code) = code {
            if self.colors {
                let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "[{code}]");
            }
        }
        let _ = writeln!(self.writer, ": {message}");
    }

    /// A plain `error: message` line, for failures outside the parser.
    pub fn emit_message(&mut self, message: &str) {
        self.write_header(None, message);
    }

    /// Report `err` against `source`, read from `path`.
    pub fn emit_parse_error(&mut self, path: &str, source: &str, err: &ParseError) {
        self.write_header(Some(err.code()), &err.to_string());

        let Some(pos) = err.pos() else {
            let _ = write!(self.writer, "  --> {path}\n  = note: {}\n", err.kind());
            return;
        };

        let index = LineIndex::new(source);
        let (line, column) = index.line_col(pos);
        let _ = writeln!(self.writer, "  --> {path}:{line}:{column}");

        if let Some(text) = index.line_text(line) {
            let number = line.to_string();
            let pad = " ".repeat(number.len());
            // Tabs are kept so the caret lines up under them.
            let caret_pad: String = text
                .chars()
                .take(column - 1)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();

            self.write_gutter(&pad);
            let _ = writeln!(self.writer);
            self.write_gutter(&number);
            if text.is_empty() {
                let _ = writeln!(self.writer);
            } else {
                let _ = writeln!(self.writer, " {text}");
            }
            self.write_gutter(&pad);
            let _ = write!(self.writer, " {caret_pad}");
            self.write_colored("^", colors::ERROR);
            let _ = writeln!(self.writer);
        }

        let _ = writeln!(self.writer, "  = note: {}", err.kind());
    }

    /// ` <label> |`, with the bar in the gutter color.
    fn write_gutter(&mut self, label: &str) {
        let _ = write!(self.writer, " {label} ");
        self.write_colored("|", colors::GUTTER);
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
