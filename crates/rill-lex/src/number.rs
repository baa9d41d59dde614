//! Integer and decimal literal scanning.
//!
//! Grounded on `original_source/src/core/Lexer.cpp`'s `LexNumber`/
//! `ParseAndAddNumber`: consume a run of digits; if a `.` follows,
//! consume digits and `.` characters greedily (multiple dots are
//! swallowed here and only diagnosed once the full run has been parsed,
//! exactly as the reference implementation does) and parse as a decimal.
//! A decimal literal that ends in `.` is a dedicated error distinct from
//! a generically malformed literal.

use rill_ast::{Literal, Token, TokenKind};
use rill_util::ErrorList;

use crate::cursor::Cursor;

/// Scans a number literal starting either on a digit (`leading_dot =
/// false`) or on a `.` that the caller has already determined is
/// followed by a digit (`leading_dot = true`, used by `.5`-style
/// literals).
pub fn scan_number(cursor: &mut Cursor<'_>, start: usize, leading_dot: bool, errors: &mut ErrorList) -> Token {
    let line = cursor.line();

    if !leading_dot {
        while cursor.peek().is_ascii_digit() {
            cursor.advance();
        }

        if cursor.peek() != b'.' {
            let text = cursor.slice(start, cursor.pos());
            return parse_integer(text, line, errors);
        }

        cursor.advance(); // consume the '.'
    }

    while cursor.peek().is_ascii_digit() || cursor.peek() == b'.' {
        cursor.advance();
    }

    let text = cursor.slice(start, cursor.pos());

    if text.ends_with('.') {
        errors.push(
            line,
            format!("Invalid decimal literal '{text}' (can't end in decimal point)"),
        );
        return Token::with_lexeme(TokenKind::Decimal, line, text.to_string(), Literal::Float(0.0));
    }

    parse_decimal(text, line, errors)
}

fn parse_integer(text: &str, line: i32, errors: &mut ErrorList) -> Token {
    match text.parse::<i32>() {
        Ok(v) => Token::with_lexeme(TokenKind::Integer, line, text.to_string(), Literal::Int(v)),
        Err(_) => {
            if text.bytes().all(|b| b.is_ascii_digit()) {
                errors.push(line, format!("Integer literal '{text}' out of range"));
            } else {
                errors.push(line, format!("Invalid integer literal '{text}'"));
            }
            Token::with_lexeme(TokenKind::Integer, line, text.to_string(), Literal::Int(0))
        }
    }
}

fn parse_decimal(text: &str, line: i32, errors: &mut ErrorList) -> Token {
    match text.parse::<f32>() {
        Ok(v) => Token::with_lexeme(TokenKind::Decimal, line, text.to_string(), Literal::Float(v)),
        Err(_) => {
            errors.push(line, format!("Invalid decimal literal '{text}'"));
            Token::with_lexeme(TokenKind::Decimal, line, text.to_string(), Literal::Float(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(src: &str) -> (Token, ErrorList) {
        let mut errors = ErrorList::new();
        let tokens = crate::Lexer::new(src).scan(&mut errors);
        (tokens.into_iter().next().unwrap(), errors)
    }

    #[test]
    fn integer_literal() {
        let (tok, errors) = lex_one("42");
        assert!(errors.is_empty());
        assert_eq!(tok.literal, Literal::Int(42));
    }

    #[test]
    fn decimal_literal() {
        let (tok, errors) = lex_one("3.14");
        assert!(errors.is_empty());
        assert_eq!(tok.literal, Literal::Float(3.14));
    }

    #[test]
    fn leading_dot_decimal() {
        let (tok, errors) = lex_one(".5");
        assert!(errors.is_empty());
        assert_eq!(tok.literal, Literal::Float(0.5));
    }

    #[test]
    fn trailing_dot_is_error() {
        let (_, errors) = lex_one("123.");
        assert_eq!(errors.len(), 1);
        assert!(errors.as_slice()[0].message.contains("decimal point"));
    }

    #[test]
    fn integer_out_of_range_is_error() {
        let (_, errors) = lex_one("99999999999999999999");
        assert_eq!(errors.len(), 1);
        assert!(errors.as_slice()[0].message.contains("out of range"));
    }
}
