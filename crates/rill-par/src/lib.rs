//! rill-par - Parser (syntactic analyzer)
//!
//! Recursive descent over the token stream produced by `rill-lex`,
//! built the way `original_source/src/core/Parser.cpp` is: one method
//! per grammar production, a `Result`-based propagation path standing
//! in for the reference implementation's thrown `Error`, and a
//! statement-boundary `catch` that synchronizes by skipping to the next
//! `;` or statement-starting keyword.
//!
//! Grammar (see the module inventory for the full production list):
//!
//! ```text
//! program     := declaration* EOF
//! declaration := block | printstmt | vardeclstmt | ifstmt
//!              | funcstmt | returnstmt | exprstmt
//! block       := "{" declaration* "}"
//! ```

mod expr;
mod list;
mod stmt;

use rill_ast::{Stmt, Token, TokenKind};
use rill_util::{ErrorList, RillError};

/// Result type used while parsing: `Err` carries the diagnostic that
/// should be recorded and synchronized past at the nearest statement
/// boundary, mirroring the reference implementation's thrown `Error`.
pub type PResult<T> = Result<T, RillError>;

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Parses a complete token stream into a vector of top-level statements.
/// On a parse error, the offending statement is skipped (its error
/// recorded in `errors`) and parsing resumes at the next synchronization
/// point, so a single malformed statement does not abort the whole run.
#[tracing::instrument(level = "trace", skip(tokens, errors), fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token], errors: &mut ErrorList) -> Vec<Stmt> {
    let mut parser = Parser::new(tokens);
    let mut statements = Vec::new();

    while !parser.is_at_end() {
        match parser.declaration() {
            Ok(stmt) => statements.push(stmt),
            Err(e) => {
                tracing::trace!(line = e.line, message = %e.message, "synchronizing past parse error");
                errors.push_error(e);
                parser.synchronize();
            }
        }
    }

    tracing::debug!(statement_count = statements.len(), error_count = errors.len(), "parse complete");
    statements
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    /// Like `advance`, but returns `true` unconditionally — used as the
    /// `consume_comma` callback passed to `parse_list`.
    fn advance_bool(&mut self) -> bool {
        self.advance();
        true
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<&Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error_here(format!(
            "Expected {what}, got '{}'",
            self.peek().representation()
        )))
    }

    fn error_here(&self, message: impl Into<String>) -> RillError {
        RillError::new(self.peek().line, message.into())
    }

    /// Skips tokens until just after the next `;`, or until a token that
    /// can start a new statement, so one bad statement doesn't cascade
    /// into spurious errors for everything that follows it.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Var
                | TokenKind::Print
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Function
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
