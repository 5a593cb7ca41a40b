//! Recursive-descent parser from tokens to a [`Value`] tree.
//!
//! Grammar (LL(1) over token kinds):
//!
//! ```text
//! Document   := Assignment*
//! Assignment := (Identifier | String) '=' Value
//! Value      := Dict | List | Scalar
//! Scalar     := Boolean | Null | Integer | Float | String
//! Dict       := '{' Assignment* '}'
//! List       := '[' (Value ','?)* ']'
//! ```
//!
//! Commas in lists are optional separators; a trailing comma is allowed.
//! Assigning a key twice in the same scope keeps the last value.

use tracing::debug;

use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::lookahead::{Kinded, Lookahead, Source};
use crate::span::Span;
use crate::token::{Lexeme, Token, TokenKind};
use crate::value::{Map, Value};

/// Containers nested deeper than this fail with
/// [`ParseErrorKind::TooDeep`] unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 512;

const KEY_START: [TokenKind; 2] = [TokenKind::Identifier, TokenKind::String];

const VALUE_START: [TokenKind; 7] = [
    TokenKind::OpenBrace,
    TokenKind::OpenBracket,
    TokenKind::Boolean,
    TokenKind::Null,
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::String,
];

/// Anything the parser accepts as a token: plain tokens, lexemes, or the
/// fallible lexemes produced by [`Lexer`](crate::lexer::Lexer).
pub trait IntoLexeme {
    fn into_lexeme(self) -> Result<Lexeme>;
}

impl IntoLexeme for Lexeme {
    #[inline]
    fn into_lexeme(self) -> Result<Lexeme> {
        Ok(self)
    }
}

impl IntoLexeme for Token {
    #[inline]
    fn into_lexeme(self) -> Result<Lexeme> {
        Ok(self.into())
    }
}

impl IntoLexeme for Result<Lexeme> {
    #[inline]
    fn into_lexeme(self) -> Result<Lexeme> {
        self
    }
}

/// Adapts a token iterator to a [`Source`].
#[derive(Debug)]
pub struct Tokens<I>(I);

impl<I> Source for Tokens<I>
where
    I: Iterator,
    I::Item: IntoLexeme,
{
    type Item = Lexeme;
    type Error = Error;

    #[inline]
    fn pull(&mut self) -> Result<Option<Lexeme>> {
        self.0.next().map(IntoLexeme::into_lexeme).transpose()
    }
}

/// Configured parser over a token sequence.
///
/// ```
/// use xcl_core::{lex, Parser};
///
/// let value = Parser::new(lex("a = [[1]]")).unwrap().max_depth(4).parse().unwrap();
/// assert!(value.get("a").is_some());
///
/// let err = Parser::new(lex("a = [[1]]")).unwrap().max_depth(1).parse().unwrap_err();
/// assert!(err.to_string().starts_with("nesting too deep"));
/// ```
#[derive(Debug)]
pub struct Parser<I>
where
    I: Iterator,
    I::Item: IntoLexeme,
{
    tokens: Lookahead<Tokens<I>>,
    max_depth: usize,
}

impl<I> Parser<I>
where
    I: Iterator,
    I::Item: IntoLexeme,
{
    /// Buffer the first token of `tokens`.
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Result<Self> {
        Ok(Self {
            tokens: Lookahead::new(Tokens(tokens.into_iter()))?,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Maximum number of nested `{}`/`[]` containers.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Parse the whole token sequence as a document.
    pub fn parse(mut self) -> Result<Value> {
        let root = document(&mut self.tokens, Depth::new(self.max_depth))?;
        debug!(keys = root.len(), "parsed document");
        Ok(Value::Map(root))
    }
}

/// Remaining nesting budget, threaded through the recursion.
#[derive(Debug, Clone, Copy)]
struct Depth {
    level: usize,
    limit: usize,
}

impl Depth {
    fn new(limit: usize) -> Self {
        Self { level: 0, limit }
    }

    fn enter(self, at: Span) -> Result<Self> {
        if self.level >= self.limit {
            return Err(ParseError::new(ParseErrorKind::TooDeep { limit: self.limit }, at).into());
        }
        Ok(Self {
            level: self.level + 1,
            ..self
        })
    }
}

fn unexpected(expected: &[TokenKind], found: Token, span: Span) -> Error {
    ParseError::new(
        ParseErrorKind::UnexpectedToken {
            expected: expected.to_vec(),
            found,
        },
        span,
    )
    .into()
}

fn document<S>(tokens: &mut Lookahead<S>, depth: Depth) -> Result<Map>
where
    S: Source<Item = Lexeme>,
    Error: From<S::Error>,
{
    let mut root = Map::new();
    while !tokens.done() {
        let (key, value) = assignment(tokens, depth)?;
        root.insert(key, value);
    }
    Ok(root)
}

fn assignment<S>(tokens: &mut Lookahead<S>, depth: Depth) -> Result<(String, Value)>
where
    S: Source<Item = Lexeme>,
    Error: From<S::Error>,
{
    let Lexeme { token, span } = tokens.expect(&KEY_START)?;
    let key = match token {
        Token::Identifier(key) | Token::String(key) => key,
        other => return Err(unexpected(&KEY_START, other, span)),
    };
    tokens.expect(&[TokenKind::Equals])?;
    let value = value(tokens, depth)?;
    Ok((key, value))
}

fn value<S>(tokens: &mut Lookahead<S>, depth: Depth) -> Result<Value>
where
    S: Source<Item = Lexeme>,
    Error: From<S::Error>,
{
    match tokens.current().map(Kinded::kind) {
        Some(TokenKind::OpenBrace) => return dict(tokens, depth).map(Value::Map),
        Some(TokenKind::OpenBracket) => return list(tokens, depth).map(Value::List),
        _ => {}
    }

    let Lexeme { token, span } = tokens.expect(&VALUE_START)?;
    Ok(match token {
        Token::Boolean(b) => Value::Bool(b),
        Token::Null => Value::Null,
        Token::Integer(i) => Value::Int(i),
        Token::Float(f) => Value::Float(f),
        Token::String(s) => Value::String(s),
        other => return Err(unexpected(&VALUE_START, other, span)),
    })
}

fn dict<S>(tokens: &mut Lookahead<S>, depth: Depth) -> Result<Map>
where
    S: Source<Item = Lexeme>,
    Error: From<S::Error>,
{
    let depth = depth.enter(tokens.current_span())?;
    tokens.wrap(TokenKind::OpenBrace, TokenKind::CloseBrace, |tokens| {
        let mut map = Map::new();
        while !tokens.done() && tokens.has(&[TokenKind::CloseBrace]).is_none() {
            let (key, value) = assignment(tokens, depth)?;
            map.insert(key, value);
        }
        Ok(map)
    })
}

fn list<S>(tokens: &mut Lookahead<S>, depth: Depth) -> Result<Vec<Value>>
where
    S: Source<Item = Lexeme>,
    Error: From<S::Error>,
{
    let depth = depth.enter(tokens.current_span())?;
    tokens.wrap(TokenKind::OpenBracket, TokenKind::CloseBracket, |tokens| {
        let mut items = Vec::new();
        while !tokens.done() && tokens.has(&[TokenKind::CloseBracket]).is_none() {
            items.push(value(tokens, depth)?);
            tokens.maybe(&[TokenKind::Comma])?;
        }
        Ok(items)
    })
}
