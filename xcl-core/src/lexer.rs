//! Character stream to token stream.
//!
//! The lexer is a lazy, fused iterator over [`Lexeme`]s. At each position it
//! tries, in order: identifier (or keyword), number, quoted string, piped
//! (dedented) string, single-character punctuation. Anything else is
//! skipped.

use std::iter::FusedIterator;
use std::str::CharIndices;

use phf::phf_map;
use tracing::trace;
use unicode_xid::UnicodeXID;

use crate::error::{LexError, LexErrorKind, Result};
use crate::lookahead::Lookahead;
use crate::span::Span;
use crate::token::{Lexeme, Token};

/// Reserved identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    True,
    False,
    Null,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "true" => Keyword::True,
    "false" => Keyword::False,
    "null" => Keyword::Null,
};

impl Keyword {
    fn token(self) -> Token {
        match self {
            Keyword::True => Token::Boolean(true),
            Keyword::False => Token::Boolean(false),
            Keyword::Null => Token::Null,
        }
    }
}

#[inline]
fn is_ident_start(c: char) -> bool {
    matches!(c, '_' | '-' | '*' | '?' | '+' | '.') || c.is_xid_start()
}

#[inline]
fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '|'
}

#[inline]
fn is_number_body(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn punctuation(c: char) -> Option<Token> {
    Some(match c {
        '[' => Token::OpenBracket,
        ']' => Token::CloseBracket,
        '{' => Token::OpenBrace,
        '}' => Token::CloseBrace,
        ',' => Token::Comma,
        '=' => Token::Equals,
        _ => return None,
    })
}

fn unescape(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '"' => '"',
        '\'' => '\'',
        _ => return None,
    })
}

/// Lazy tokenizer over a source string.
///
/// Yields `Ok(Lexeme)` per token; after the first `Err` it yields nothing.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    chars: Lookahead<CharIndices<'a>>,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let chars = match Lookahead::new(source.char_indices()) {
            Ok(chars) => chars,
            Err(never) => match never {},
        };
        Self {
            source,
            chars,
            failed: false,
        }
    }

    /// Byte offset of the next unread character.
    #[inline]
    fn offset(&self) -> usize {
        self.chars.current().map_or(self.source.len(), |&(at, _)| at)
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> Result<()> {
        while let Some(&(_, c)) = self.chars.current() {
            if !pred(c) {
                break;
            }
            self.chars.advance()?;
        }
        Ok(())
    }

    fn lex_token(&mut self, c: char) -> Result<Option<Token>> {
        if is_ident_start(c) {
            return self.identifier().map(Some);
        }
        if c.is_ascii_digit() {
            return self.number().map(Some);
        }
        match c {
            '"' => self.quoted().map(|text| Some(Token::String(text))),
            '|' => self.piped().map(Some),
            _ => {
                let (at, _) = self.chars.expect(&[c])?;
                let token = punctuation(c);
                if token.is_none() && !c.is_whitespace() {
                    trace!(offset = at, ch = ?c, "skipping unrecognized character");
                }
                Ok(token)
            }
        }
    }

    fn identifier(&mut self) -> Result<Token> {
        let start = self.offset();
        self.skip_while(is_ident_continue)?;
        let text = &self.source[start..self.offset()];
        Ok(match KEYWORDS.get(text) {
            Some(keyword) => keyword.token(),
            None => Token::Identifier(text.to_owned()),
        })
    }

    fn number(&mut self) -> Result<Token> {
        let start = self.offset();
        if self.chars.maybe(&['0'])?.is_some() && self.chars.has(&['.']).is_none() {
            return Ok(Token::Integer(0));
        }
        self.skip_while(is_number_body)?;

        let text = &self.source[start..self.offset()];
        let token = if text.contains('.') {
            text.parse().map(Token::Float).ok()
        } else {
            text.parse().map(Token::Integer).ok()
        };
        token.ok_or_else(|| {
            LexError::new(
                LexErrorKind::InvalidNumber(text.to_owned()),
                Span::new(start, start + text.len()),
            )
            .into()
        })
    }

    /// Scan `"..."`, decoding escapes.
    fn quoted(&mut self) -> Result<String> {
        let (open, _) = self.chars.expect(&['"'])?;
        let unterminated =
            |end: usize| LexError::new(LexErrorKind::UnterminatedString, Span::new(open, end));

        let mut text = String::new();
        loop {
            let Some((at, c)) = self.chars.advance()? else {
                return Err(unterminated(self.source.len()).into());
            };
            match c {
                '"' => return Ok(text),
                '\\' => {
                    let Some((_, escaped)) = self.chars.advance()? else {
                        return Err(LexError::new(
                            LexErrorKind::InvalidEscape("\\".into()),
                            Span::new(at, at + 1),
                        )
                        .into());
                    };
                    match unescape(escaped) {
                        Some(decoded) => text.push(decoded),
                        None => {
                            return Err(LexError::new(
                                LexErrorKind::InvalidEscape(format!("\\{escaped}")),
                                Span::new(at, at + 1 + escaped.len_utf8()),
                            )
                            .into())
                        }
                    }
                }
                _ => text.push(c),
            }
        }
    }

    /// Scan `|"..."` and strip the common indentation.
    fn piped(&mut self) -> Result<Token> {
        let (start, _) = self.chars.expect(&['|'])?;
        if self.chars.has(&['"']).is_none() {
            let next = self.chars.current().map(|&(_, c)| c);
            let sequence: String = std::iter::once('|').chain(next).collect();
            let span = Span::new(start, start + sequence.len());
            return Err(LexError::new(LexErrorKind::UnexpectedSequence(sequence), span).into());
        }

        let raw = self.quoted()?;
        dedent(&raw)
            .map(Token::String)
            .map_err(|kind| LexError::new(kind, Span::new(start, self.offset())).into())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let &(start, c) = self.chars.current()?;
            match self.lex_token(c) {
                Ok(Some(token)) => {
                    let span = Span::new(start, self.offset());
                    return Some(Ok(Lexeme::new(token, span)));
                }
                Ok(None) => continue,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Split on `\n`, keeping a trailing empty line like `str::split` does.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for newline in memchr::memchr_iter(b'\n', text.as_bytes()) {
        lines.push(&text[start..newline]);
        start = newline + 1;
    }
    lines.push(&text[start..]);
    lines
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Drop the first `count` characters of `line` (all of it if shorter).
fn skip_chars(line: &str, count: usize) -> &str {
    line.char_indices().nth(count).map_or("", |(at, _)| &line[at..])
}

/// Remove the indentation of the first non-blank line from every line.
///
/// Leading blank lines are dropped. Every other non-blank line must start
/// with exactly that indentation.
fn dedent(text: &str) -> std::result::Result<String, LexErrorKind> {
    let lines = split_lines(text);
    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return Ok(String::new());
    };
    let lines = &lines[first..];

    let head = lines[0];
    let body = head.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let indent = &head[..head.len() - body.len()];
    if lines.iter().any(|line| !is_blank(line) && !line.starts_with(indent)) {
        return Err(LexErrorKind::IndentMismatch);
    }

    let width = indent.chars().count();
    Ok(lines
        .iter()
        .map(|line| skip_chars(line, width))
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        Lexer::new(text).map(|lexeme| lexeme.unwrap().token).collect()
    }

    #[test]
    fn test_keywords_are_exact() {
        assert_eq!(tokens("true"), vec![Token::Boolean(true)]);
        assert_eq!(tokens("True"), vec![Token::Identifier("True".into())]);
        assert_eq!(tokens("nullable"), vec![Token::Identifier("nullable".into())]);
    }

    #[test]
    fn test_identifier_charset() {
        assert_eq!(tokens("-a*b?c+d.e_f|g9"), vec![Token::Identifier("-a*b?c+d.e_f|g9".into())]);
        assert_eq!(tokens("ünïcode"), vec![Token::Identifier("ünïcode".into())]);
        // `|` continues an identifier but cannot start one
        let mut lexer = Lexer::new("a |b");
        assert_eq!(lexer.next().unwrap().unwrap().token, Token::Identifier("a".into()));
        assert!(lexer.next().unwrap().is_err());
    }

    #[test]
    fn test_leading_zero() {
        assert_eq!(tokens("0"), vec![Token::Integer(0)]);
        assert_eq!(tokens("05"), vec![Token::Integer(0), Token::Integer(5)]);
        assert_eq!(tokens("0.25"), vec![Token::Float(0.25)]);
        assert_eq!(tokens("10.5"), vec![Token::Float(10.5)]);
    }

    #[test]
    fn test_spans() {
        let spans: Vec<Span> = Lexer::new("k = \"v\"")
            .map(|lexeme| lexeme.unwrap().span)
            .collect();
        assert_eq!(spans, vec![Span::new(0, 1), Span::new(2, 3), Span::new(4, 7)]);
    }

    #[test]
    fn test_fused_after_error() {
        let mut lexer = Lexer::new("a 1.2.3 b");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_dedent() {
        assert_eq!(dedent("\n    a\n      b\n    c").unwrap(), "a\n  b\nc");
        assert_eq!(dedent("\t\tx\n\n\t\ty").unwrap(), "x\n\ny");
        assert_eq!(dedent("  \n \n").unwrap(), "");
        assert_eq!(dedent("no indent").unwrap(), "no indent");
    }

    #[test]
    fn test_dedent_short_blank_lines() {
        // Blank lines shorter than the indent become empty.
        assert_eq!(dedent("    a\n  \n    b").unwrap(), "a\n\nb");
    }

    #[test]
    fn test_dedent_mismatch() {
        assert_eq!(dedent("    a\n  b"), Err(LexErrorKind::IndentMismatch));
        assert_eq!(dedent("  a\n\tb"), Err(LexErrorKind::IndentMismatch));
    }
}
