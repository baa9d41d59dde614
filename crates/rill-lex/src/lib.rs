//! rill-lex - Lexical analyzer (tokenizer).
//!
//! Transforms source text into a vector of [`Token`]s terminated by an
//! `Eof` token. Scanning is single-pass with one-character lookahead,
//! grounded on `faxc-lex`'s cursor-driven scan loop and, for exact
//! token-level semantics (maximal munch, number/string edge cases),
//! on `original_source/src/core/Lexer.cpp`.
//!
//! Lexing is total: malformed input is recorded in the shared
//! [`ErrorList`] and scanning continues, so the lexer always returns a
//! token stream (ending in `Eof`) regardless of how many errors were
//! raised along the way.

mod cursor;
mod identifier;
mod number;
mod string;

use rill_ast::{Token, TokenKind};
use rill_util::ErrorList;

use cursor::Cursor;
use identifier::{is_alpha, scan_identifier};
use number::scan_number;
use string::scan_string;

/// Scans `source` into a token stream, appending any lexical errors to
/// `errors`. Always returns at least one token (`Eof`).
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    #[tracing::instrument(level = "trace", skip(self, errors), fields(len = self.source.len()))]
    pub fn scan(&self, errors: &mut ErrorList) -> Vec<Token> {
        let mut cursor = Cursor::new(self.source);
        let mut tokens = Vec::new();

        while !cursor.is_at_end() {
            if let Some(token) = scan_one(&mut cursor, errors) {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, cursor.line()));
        tracing::debug!(token_count = tokens.len(), error_count = errors.len(), "scan complete");
        tokens
    }
}

fn single(kind: TokenKind, line: i32) -> Option<Token> {
    Some(Token::new(kind, line))
}

fn scan_one(cursor: &mut Cursor<'_>, errors: &mut ErrorList) -> Option<Token> {
    use TokenKind::*;

    let start = cursor.pos();
    let line = cursor.line();
    let c = cursor.advance();

    match c {
        b'(' => single(ParenL, line),
        b')' => single(ParenR, line),
        b'{' => single(BraceL, line),
        b'}' => single(BraceR, line),
        b'[' => single(BracketL, line),
        b']' => single(BracketR, line),
        b',' => single(Comma, line),
        b';' => single(Semicolon, line),
        b'+' => single(Plus, line),
        b'-' => single(Minus, line),
        b'%' => single(Percent, line),

        b'>' => {
            if cursor.match_consume(b'=') {
                single(GreaterEqual, line)
            } else {
                single(Greater, line)
            }
        }
        b'<' => {
            if cursor.match_consume(b'=') {
                single(LessEqual, line)
            } else {
                single(Less, line)
            }
        }
        b'=' => {
            if cursor.match_consume(b'=') {
                single(EqualEqual, line)
            } else {
                single(Equal, line)
            }
        }
        b'!' => {
            if cursor.match_consume(b'=') {
                single(BangEqual, line)
            } else {
                errors.push(line, format!("Unknown token {}", c as char));
                None
            }
        }
        b'*' => {
            if cursor.match_consume(b'*') {
                single(StarStar, line)
            } else {
                single(Star, line)
            }
        }
        b'.' => {
            if cursor.peek().is_ascii_digit() {
                Some(scan_number(cursor, start, true, errors))
            } else {
                single(Dot, line)
            }
        }
        b'/' => {
            if cursor.match_consume(b'/') {
                skip_to_newline(cursor);
                None
            } else {
                single(Slash, line)
            }
        }

        b'"' => scan_string(cursor, start, errors),

        b'\n' | b'\t' | b'\r' | b' ' => None,

        _ => {
            if is_alpha(c) {
                Some(scan_identifier(cursor, start))
            } else if c.is_ascii_digit() {
                Some(scan_number(cursor, start, false, errors))
            } else {
                errors.push(line, format!("Unknown token {}", c as char));
                None
            }
        }
    }
}

fn skip_to_newline(cursor: &mut Cursor<'_>) {
    while !cursor.is_at_end() && cursor.peek() != b'\n' {
        cursor.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut errors = ErrorList::new();
        Lexer::new(src)
            .scan(&mut errors)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexing_is_total_even_on_garbage() {
        let mut errors = ErrorList::new();
        let tokens = Lexer::new("@@@").scan(&mut errors);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn maximal_munch_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds(">= > < <= == = != **  * / // comment\n+"),
            vec![
                GreaterEqual, Greater, Less, LessEqual, EqualEqual, Equal, BangEqual, StarStar,
                Star, Slash, Plus, Eof
            ]
        );
    }

    #[test]
    fn bare_bang_is_error() {
        let mut errors = ErrorList::new();
        Lexer::new("!").scan(&mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn comment_consumes_to_end_of_line() {
        assert_eq!(kinds("// nope\nprint"), vec![TokenKind::Print, TokenKind::Eof]);
    }

    #[test]
    fn newline_increments_line_on_next_token() {
        let mut errors = ErrorList::new();
        let tokens = Lexer::new("\n\nvar").scan(&mut errors);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn whole_program_lexes() {
        let mut errors = ErrorList::new();
        let tokens = Lexer::new("var x = 3; print x;").scan(&mut errors);
        assert!(errors.is_empty());
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn literal_token_kind_is_str_not_string() {
        // Exercises the rename of TokenKind::String -> TokenKind::Str
        // so it isn't confused with the Rust prelude `String` type.
        assert_eq!(kinds("\"x\""), vec![TokenKind::Str, TokenKind::Eof]);
    }
}
