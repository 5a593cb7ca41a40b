//! Error types for lexing and parsing.
//!
//! Every error is terminal: the call that produced it returns no partial
//! value, and nothing is retried.

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure from [`lex`](crate::lex), [`parse`](crate::parse) or
/// [`loads`](crate::loads).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Source span the error points at.
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(err) => err.span,
            Error::Parse(err) => err.span,
        }
    }
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Malformed character sequence in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// `|` not followed by `"`
    #[error("unexpected character sequence: {0:?}")]
    UnexpectedSequence(String),

    /// Backslash followed by a character outside `n r t " '`, or by
    /// the end of input
    #[error("invalid string escape sequence: {0:?}")]
    InvalidEscape(String),

    /// A non-blank line of a piped string does not start with the
    /// indentation of its first non-blank line.
    #[error("indent mismatch in indented string")]
    IndentMismatch,

    /// Input ended before the closing `"`.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// Digits and dots that do not form an integer or float
    /// (`1.2.3`, out-of-range integers).
    #[error("invalid number literal: {0:?}")]
    InvalidNumber(String),

    /// Character-level `expect` mismatch.
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
}

/// Token sequence that does not match the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {}, found {found}", OneOf(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: Token,
    },

    #[error("expected {}, found end of input", OneOf(.expected))]
    UnexpectedEof { expected: Vec<TokenKind> },

    /// More nested containers than the parser's configured limit.
    #[error("nesting too deep: more than {limit} levels")]
    TooDeep { limit: usize },
}

/// Renders `a`, `a or b`, or `one of a, b, c`.
struct OneOf<'a>(&'a [TokenKind]);

impl fmt::Display for OneOf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => f.write_str("nothing"),
            [one] => write!(f, "{one}"),
            [a, b] => write!(f, "{a} or {b}"),
            [first, rest @ ..] => {
                write!(f, "one of {first}")?;
                for kind in rest {
                    write!(f, ", {kind}")?;
                }
                Ok(())
            }
        }
    }
}
