//! Identifier and keyword scanning: `[A-Za-z_][A-Za-z0-9_]*`, checked
//! against the keyword table to decide whether it becomes a keyword
//! token or a plain `Identifier`.

use rill_ast::{keyword_or_identifier, Literal, Token};

use crate::cursor::Cursor;

pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_alphanumeric(b: u8) -> bool {
    is_alpha(b) || b.is_ascii_digit()
}

pub fn scan_identifier(cursor: &mut Cursor<'_>, start: usize) -> Token {
    let line = cursor.line();

    while is_alphanumeric(cursor.peek()) {
        cursor.advance();
    }

    let lexeme = cursor.slice(start, cursor.pos()).to_string();
    let kind = keyword_or_identifier(&lexeme);

    Token::with_lexeme(kind, line, lexeme, Literal::None)
}

#[cfg(test)]
mod tests {
    use rill_ast::TokenKind;
    use rill_util::ErrorList;

    #[test]
    fn identifier_vs_keyword() {
        let mut errors = ErrorList::new();
        let tokens = crate::Lexer::new("foo var").scan(&mut errors);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::Var);
    }
}
