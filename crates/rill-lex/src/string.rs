//! String literal scanning. No escape sequences are recognized — the
//! literal payload is exactly the text between the quotes, matching
//! `original_source/src/core/Lexer.cpp`'s `LexString`.

use rill_ast::{Literal, Token, TokenKind};
use rill_util::ErrorList;

use crate::cursor::Cursor;

pub fn scan_string(cursor: &mut Cursor<'_>, start: usize, errors: &mut ErrorList) -> Option<Token> {
    let starting_line = cursor.line();

    while cursor.peek() != b'"' {
        if cursor.is_at_end() {
            errors.push(
                cursor.line(),
                format!("Unterminated string literal (starting at line {starting_line})"),
            );
            return None;
        }
        cursor.advance();
    }

    cursor.advance(); // the terminating quote

    let lexeme = cursor.slice(start, cursor.pos());
    let inner = if lexeme.len() > 2 {
        lexeme[1..lexeme.len() - 1].to_string()
    } else {
        String::new()
    };

    Some(Token::with_lexeme(
        TokenKind::Str,
        starting_line,
        lexeme.to_string(),
        Literal::Str(inner),
    ))
}
