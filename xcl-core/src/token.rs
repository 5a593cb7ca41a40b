//! Token model shared by the lexer and the parser.
//!
//! A [`Token`] is the payload-carrying unit the lexer emits; [`TokenKind`]
//! is its payload-free tag, which is what the parser matches on and what
//! error messages name.

use std::fmt;

use crate::error::{Error, ParseError, ParseErrorKind};
use crate::lookahead::Kinded;
use crate::span::Span;

/// A lexical token.
///
/// Equality is structural: same variant, same payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: `name`, `x.y`, `-flag`, `a|b`
    Identifier(String),
    /// Decoded quoted or piped string
    String(String),
    /// `true` or `false`
    Boolean(bool),
    /// `null`
    Null,
    Integer(i64),
    Float(f64),
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Equals,
}

/// Payload-free tag of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    String,
    Boolean,
    Null,
    Integer,
    Float,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Equals,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Identifier(_) => TokenKind::Identifier,
            Token::String(_) => TokenKind::String,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Null => TokenKind::Null,
            Token::Integer(_) => TokenKind::Integer,
            Token::Float(_) => TokenKind::Float,
            Token::OpenBrace => TokenKind::OpenBrace,
            Token::CloseBrace => TokenKind::CloseBrace,
            Token::OpenBracket => TokenKind::OpenBracket,
            Token::CloseBracket => TokenKind::CloseBracket,
            Token::Comma => TokenKind::Comma,
            Token::Equals => TokenKind::Equals,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "`null`",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Equals => "`=`",
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier `{name}`"),
            Token::String(text) => write!(f, "string {text:?}"),
            Token::Boolean(value) => write!(f, "`{value}`"),
            Token::Integer(value) => write!(f, "integer {value}"),
            Token::Float(value) => write!(f, "float {value:?}"),
            other => fmt::Display::fmt(&other.kind(), f),
        }
    }
}

/// A token together with the source span it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

impl Lexeme {
    #[inline]
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }

    #[inline]
    pub fn into_token(self) -> Token {
        self.token
    }
}

impl From<Token> for Lexeme {
    fn from(token: Token) -> Self {
        Self::new(token, Span::default())
    }
}

impl Kinded for Lexeme {
    type Kind = TokenKind;

    #[inline]
    fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    #[inline]
    fn span(&self) -> Span {
        self.span
    }

    fn mismatch(expected: &[TokenKind], found: Option<&Self>, at: Span) -> Error {
        let expected = expected.to_vec();
        match found {
            Some(lexeme) => ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected,
                    found: lexeme.token.clone(),
                },
                lexeme.span,
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEof { expected }, at),
        }
        .into()
    }
}
