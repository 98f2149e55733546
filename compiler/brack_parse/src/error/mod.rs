//! Parse errors.
//!
//! Every failure is a [`ParseError`] variant carrying the byte position
//! where parsing stopped. [`ParseError::kind`] groups variants into the
//! four broad [`ErrorKind`]s and [`ParseError::code`] gives each a stable
//! code for diagnostics.

use std::fmt;

use brack_lexer_core::ScanError;
use brack_stack::StackError;

/// Broad failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input.
    Syntax,
    /// Storage for the parse could not be reserved.
    Memory,
    /// Nesting exceeded the ancestor stack.
    StackCapacity,
    /// End of input with nodes still open.
    UnclosedNode,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Memory => "out of memory",
            ErrorKind::StackCapacity => "nesting too deep",
            ErrorKind::UnclosedNode => "unclosed node",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a document failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("expected `[` at start of document, found `{found}`")]
    ExpectedOpenBracket { found: char, pos: usize },

    #[error("expected node name after `[`")]
    ExpectedNodeName { pos: usize },

    #[error("unexpected `]` with no open node")]
    UnexpectedClose { pos: usize },

    #[error("attribute outside node")]
    AttributeOutsideNode { pos: usize },

    #[error("missing closing quote `{quote}`")]
    MissingClosingQuote { quote: char, pos: usize },

    #[error("unexpected character `{found}`")]
    UnexpectedChar { found: char, pos: usize },

    #[error("more than one top-level node")]
    MultipleRoots { pos: usize },

    #[error("nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize, pos: usize },

    #[error("{open} node(s) still open at end of input")]
    Unclosed { open: usize, pos: usize },

    #[error("cannot set up ancestor stack: {0}")]
    AncestorStack(#[source] StackError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyInput
            | ParseError::ExpectedOpenBracket { .. }
            | ParseError::ExpectedNodeName { .. }
            | ParseError::UnexpectedClose { .. }
            | ParseError::AttributeOutsideNode { .. }
            | ParseError::MissingClosingQuote { .. }
            | ParseError::UnexpectedChar { .. }
            | ParseError::MultipleRoots { .. } => ErrorKind::Syntax,
            ParseError::NestingTooDeep { .. } => ErrorKind::StackCapacity,
            ParseError::Unclosed { .. } => ErrorKind::UnclosedNode,
            ParseError::AncestorStack(StackError::Memory { .. }) => ErrorKind::Memory,
            ParseError::AncestorStack(_) => ErrorKind::StackCapacity,
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "B0001",
            ParseError::ExpectedOpenBracket { .. } => "B0002",
            ParseError::ExpectedNodeName { .. } => "B0003",
            ParseError::UnexpectedClose { .. } => "B0004",
            ParseError::AttributeOutsideNode { .. } => "B0005",
            ParseError::MissingClosingQuote { .. } => "B0006",
            ParseError::UnexpectedChar { .. } => "B0007",
            ParseError::MultipleRoots { .. } => "B0008",
            ParseError::NestingTooDeep { .. } => "B0009",
            ParseError::Unclosed { .. } => "B0010",
            ParseError::AncestorStack(_) => "B0011",
        }
    }

    /// Byte offset the error points at, when it has one.
    pub fn pos(&self) -> Option<usize> {
        match *self {
            ParseError::EmptyInput | ParseError::AncestorStack(_) => None,
            ParseError::ExpectedOpenBracket { pos, .. }
            | ParseError::ExpectedNodeName { pos }
            | ParseError::UnexpectedClose { pos }
            | ParseError::AttributeOutsideNode { pos }
            | ParseError::MissingClosingQuote { pos, .. }
            | ParseError::UnexpectedChar { pos, .. }
            | ParseError::MultipleRoots { pos }
            | ParseError::NestingTooDeep { pos, .. }
            | ParseError::Unclosed { pos, .. } => Some(pos),
        }
    }
}

impl From<ScanError> for ParseError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingClosingQuote { quote, pos } => {
                ParseError::MissingClosingQuote { quote, pos }
            }
            ScanError::ExpectedQuote { quote, pos } => {
                ParseError::UnexpectedChar { found: quote, pos }
            }
        }
    }
}
