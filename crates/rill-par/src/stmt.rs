//! Statement parsing, grounded on `original_source/src/core/Parser.cpp`'s
//! `ParseDeclaration`/`ParseBlock`/`ParseIfStatement`/`ParseFuncStatement`/
//! `ParseReturnStatement`. A function body is guaranteed to end in a
//! `Return` statement: if the user's body doesn't, a synthetic
//! `return;` (yielding `Null`) is appended here, once, after parsing.

use std::rc::Rc;

use rill_ast::{Stmt, TokenKind};

use crate::list::parse_list;
use crate::{PResult, Parser};

impl Parser<'_> {
    pub fn declaration(&mut self) -> PResult<Stmt> {
        match self.peek().kind {
            TokenKind::BraceL => self.block_stmt(),
            TokenKind::Print => self.print_stmt(),
            TokenKind::Var => self.var_decl_stmt(),
            TokenKind::If => self.if_stmt(),
            TokenKind::Function => self.func_stmt(),
            TokenKind::Return => self.return_stmt(),
            _ => self.expr_stmt(),
        }
    }

    fn block_stmt(&mut self) -> PResult<Stmt> {
        let open = self.advance().clone();
        let statements = self.block_body()?;
        let close = self.previous().clone();
        Ok(Stmt::Block { open, close, statements })
    }

    /// Parses declarations up to (and consuming) the closing `}`,
    /// failing with "Unclosed block at EOF" if the stream runs out
    /// first.
    fn block_body(&mut self) -> PResult<Rc<[Stmt]>> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::BraceR) {
            if self.is_at_end() {
                return Err(self.error_here("Unclosed block at EOF"));
            }
            statements.push(self.declaration()?);
        }
        self.advance(); // the closing '}'

        Ok(Rc::from(statements))
    }

    fn print_stmt(&mut self) -> PResult<Stmt> {
        let line = self.advance().line; // 'print'
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "';' after print statement")?;
        Ok(Stmt::Print { line, expr })
    }

    fn var_decl_stmt(&mut self) -> PResult<Stmt> {
        let line = self.advance().line; // 'var'
        let identifier = self.expect(TokenKind::Identifier, "variable name")?.clone();
        self.expect(TokenKind::Equal, "'=' in variable declaration")?;
        let value = self.expression()?;
        self.expect(TokenKind::Semicolon, "';' after variable declaration")?;
        Ok(Stmt::VarDecl { line, identifier, value })
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let if_token = self.advance().clone(); // 'if'
        self.expect(TokenKind::ParenL, "'(' after 'if'")?;
        let condition = self.expression()?;
        self.expect(TokenKind::ParenR, "')' after if condition")?;
        let yes_branch = Box::new(self.declaration()?);

        let (else_token, no_branch) = if self.check(TokenKind::Else) {
            let else_token = self.advance().clone();
            (Some(else_token), Some(Box::new(self.declaration()?)))
        } else {
            (None, None)
        };

        Ok(Stmt::If {
            if_token,
            else_token,
            condition,
            yes_branch,
            no_branch,
        })
    }

    fn func_stmt(&mut self) -> PResult<Stmt> {
        let func_token = self.advance().clone(); // 'func'
        let name_token = self.expect(TokenKind::Identifier, "function name")?.clone();
        self.expect(TokenKind::ParenL, "'(' after function name")?;
        let params = self.params()?;
        self.expect(TokenKind::ParenR, "')' after function parameters")?;
        self.expect(TokenKind::BraceL, "'{' to start function body")?;
        let mut statements = self.block_body()?.to_vec();

        if statements.last().map(Stmt::is_return) != Some(true) {
            statements.push(Stmt::Return {
                line: name_token.line,
                value: None,
            });
        }

        Ok(Stmt::Func {
            func_token,
            name_token,
            params,
            statements: Rc::from(statements),
        })
    }

    fn params(&mut self) -> PResult<Vec<rill_ast::Token>> {
        if self.check(TokenKind::ParenR) {
            return Ok(Vec::new());
        }

        let mut error = None;
        let (params, trailing_comma) = parse_list(
            self,
            |p| {
                if error.is_some() || p.check(TokenKind::ParenR) {
                    return None;
                }
                match p.expect(TokenKind::Identifier, "parameter name") {
                    Ok(t) => Some(t.clone()),
                    Err(e) => {
                        error = Some(e);
                        None
                    }
                }
            },
            |p| p.check(TokenKind::Comma) && p.advance_bool(),
        );

        if let Some(e) = error {
            return Err(e);
        }

        if trailing_comma {
            return Err(self.error_here("Unexpected trailing comma in parameter list"));
        }

        Ok(params)
    }

    fn return_stmt(&mut self) -> PResult<Stmt> {
        let line = self.advance().line; // 'return'
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "';' after return statement")?;
        Ok(Stmt::Return { line, value })
    }

    fn expr_stmt(&mut self) -> PResult<Stmt> {
        let line = self.peek().line;
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "';' after expression statement")?;
        Ok(Stmt::Expr { line, expr })
    }
}
