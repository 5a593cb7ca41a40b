//! One-item lookahead over characters or tokens.
//!
//! [`Lookahead`] is the single cursor abstraction under both the lexer
//! (over `(offset, char)` pairs) and the parser (over [`Lexeme`]s). The end
//! of the underlying source is an explicit `None` from [`Lookahead::current`]
//! rather than an error.
//!
//! ```
//! use xcl_core::lookahead::Lookahead;
//!
//! let mut chars = Lookahead::new("ab".char_indices()).unwrap();
//! assert_eq!(chars.maybe(&['x']).unwrap(), None);
//! assert_eq!(chars.expect(&['a', 'b']).unwrap(), (0, 'a'));
//! assert!(chars.has(&['b']).is_some());
//! ```
//!
//! [`Lexeme`]: crate::token::Lexeme

use std::str::CharIndices;

use crate::error::{Error, LexError, LexErrorKind, Result};
use crate::span::Span;

/// An item that can be matched by kind and located in the source.
pub trait Kinded {
    type Kind: Copy + PartialEq;

    fn kind(&self) -> Self::Kind;

    fn span(&self) -> Span;

    /// Error reported by [`Lookahead::expect`] when `found` is not one of
    /// `expected`. `found` is `None` at end of input, located at `at`.
    fn mismatch(expected: &[Self::Kind], found: Option<&Self>, at: Span) -> Error;
}

/// Pull-based source of items.
pub trait Source {
    type Item: Kinded;
    type Error;

    fn pull(&mut self) -> std::result::Result<Option<Self::Item>, Self::Error>;
}

impl Kinded for (usize, char) {
    type Kind = char;

    #[inline]
    fn kind(&self) -> char {
        self.1
    }

    #[inline]
    fn span(&self) -> Span {
        Span::new(self.0, self.0 + self.1.len_utf8())
    }

    fn mismatch(expected: &[char], found: Option<&Self>, at: Span) -> Error {
        let expected = expected
            .iter()
            .map(|c| format!("{c:?}"))
            .collect::<Vec<_>>()
            .join(" or ");
        let (found, span) = match found {
            Some(item) => (format!("{:?}", item.1), item.span()),
            None => ("end of input".to_string(), at),
        };
        LexError::new(LexErrorKind::Expected { expected, found }, span).into()
    }
}

impl Source for CharIndices<'_> {
    type Item = (usize, char);
    type Error = std::convert::Infallible;

    #[inline]
    fn pull(&mut self) -> std::result::Result<Option<(usize, char)>, Self::Error> {
        Ok(self.next())
    }
}

/// Cursor exposing exactly one buffered item of lookahead.
#[derive(Debug)]
pub struct Lookahead<S: Source> {
    source: S,
    current: Option<S::Item>,
    /// Set once `advance` has returned the end marker.
    finished: bool,
    /// End offset of the last consumed item.
    end: usize,
}

impl<S> Lookahead<S>
where
    S: Source,
    Error: From<S::Error>,
{
    /// Wrap `source`, buffering its first item.
    pub fn new(mut source: S) -> std::result::Result<Self, S::Error> {
        let current = source.pull()?;
        Ok(Self {
            source,
            current,
            finished: false,
            end: 0,
        })
    }

    /// The buffered item, or `None` once the source is exhausted.
    #[inline]
    pub fn current(&self) -> Option<&S::Item> {
        self.current.as_ref()
    }

    #[inline]
    pub fn done(&self) -> bool {
        self.current.is_none()
    }

    /// Span of the buffered item, or an empty span just past the last
    /// consumed item at end of input.
    pub fn current_span(&self) -> Span {
        self.current.as_ref().map_or(Span::at(self.end), Kinded::span)
    }

    /// Return the buffered item and buffer the next one.
    ///
    /// At end of input this returns `Ok(None)` exactly once.
    ///
    /// # Panics
    ///
    /// Panics if called again after the end marker was returned.
    pub fn advance(&mut self) -> Result<Option<S::Item>> {
        match self.current.take() {
            Some(item) => {
                self.end = item.span().end;
                self.current = self.source.pull()?;
                Ok(Some(item))
            }
            None => {
                assert!(!self.finished, "BUG: advance() called on an exhausted stream");
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// The buffered item if its kind is one of `kinds`. Never consumes.
    pub fn has(&self, kinds: &[<S::Item as Kinded>::Kind]) -> Option<&S::Item> {
        self.current
            .as_ref()
            .filter(|item| kinds.contains(&item.kind()))
    }

    /// Consume and return the buffered item if its kind is one of `kinds`;
    /// otherwise leave the stream untouched.
    pub fn maybe(&mut self, kinds: &[<S::Item as Kinded>::Kind]) -> Result<Option<S::Item>> {
        if self.has(kinds).is_none() {
            return Ok(None);
        }
        self.advance()
    }

    /// Consume the buffered item, failing unless its kind is one of `kinds`.
    pub fn expect(&mut self, kinds: &[<S::Item as Kinded>::Kind]) -> Result<S::Item> {
        match self.maybe(kinds)? {
            Some(item) => Ok(item),
            None => Err(<S::Item as Kinded>::mismatch(
                kinds,
                self.current.as_ref(),
                Span::at(self.end),
            )),
        }
    }

    /// Expect `open`, run `body`, then expect `close`.
    ///
    /// The closing expectation runs even when `body` fails; the body's
    /// error takes precedence over the closer's.
    pub fn wrap<R>(
        &mut self,
        open: <S::Item as Kinded>::Kind,
        close: <S::Item as Kinded>::Kind,
        body: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.expect(&[open])?;
        let result = body(self);
        let closed = self.expect(&[close]);
        let value = result?;
        closed?;
        Ok(value)
    }
}
