//! XCL Core Parser
//!
//! Lexer and recursive-descent parser for XCL, a small configuration
//! language of `key = value` assignments with nested dicts and lists.
//!
//! ```
//! use xcl_core::{loads, Value};
//!
//! let doc = loads(r#"
//!     name = "foo"
//!     ls = [1, 2, 3,]
//!     p = { tl = [1 2] br = [3 4] }
//! "#).unwrap();
//!
//! assert_eq!(doc.get("name"), Some(&Value::from("foo")));
//! assert_eq!(doc.get("p").and_then(|p| p.get("br")), Some(&Value::from(vec![3, 4])));
//! ```
//!
//! # Architecture
//!
//! - **lookahead.rs** - One-item lookahead cursor shared by lexer and parser
//! - **token.rs** - Token, TokenKind and Lexeme (token + span)
//! - **lexer.rs** - Lazy character-to-token iterator
//! - **parser.rs** - Recursive-descent parser producing a Value tree
//! - **value.rs** - Value tree types
//! - **error.rs** - Lex and parse errors
//! - **span.rs** - Byte spans into the source

pub mod error;
pub mod lexer;
pub mod lookahead;
pub mod parser;
pub mod span;
pub mod token;
pub mod value;

pub use error::{Error, LexError, LexErrorKind, ParseError, ParseErrorKind, Result};
pub use lexer::Lexer;
pub use parser::{IntoLexeme, Parser, DEFAULT_MAX_DEPTH};
pub use span::Span;
pub use token::{Lexeme, Token, TokenKind};
pub use value::{Map, Value};

/// Tokenize `text` lazily.
pub fn lex(text: &str) -> Lexer<'_> {
    Lexer::new(text)
}

/// Parse a token sequence into a document. The result is always a
/// [`Value::Map`].
pub fn parse<T>(tokens: T) -> Result<Value>
where
    T: IntoIterator,
    T::Item: IntoLexeme,
{
    Parser::new(tokens)?.parse()
}

/// Parse XCL source text; `parse(lex(text))`.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn loads(text: &str) -> Result<Value> {
    parse(lex(text))
}
