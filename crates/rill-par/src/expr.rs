//! Expression parsing: precedence-climbing over a fixed ladder of
//! binary layers (assignment, equality, comparison, term, factor) atop
//! unary/call/primary, grounded on `original_source/src/core/Parser.cpp`'s
//! `ParseExpression`/`ParseEquality`/`ParseComparison`/`ParseTerm`/
//! `ParseFactor`/`ParseUnary`/`ParseCall`/`ParsePrimary` chain. `**` and
//! `%` are lexed but sit outside this grammar, matching the reference
//! implementation exactly (the evaluator still accepts `**` if produced
//! synthetically, per the parser's open question on the point).

use rill_ast::{Expr, Literal, TokenKind, Value};
use rill_util::RillError;

use crate::list::parse_list;
use crate::{PResult, Parser};

impl Parser<'_> {
    pub fn expression(&mut self) -> PResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> PResult<Expr> {
        let target = self.equality()?;

        if self.check(TokenKind::Equal) {
            let equal = self.advance().clone();
            let value = self.assignment()?;
            return Ok(Expr::Assignment {
                target: Box::new(target),
                value: Box::new(value),
                equal,
            });
        }

        Ok(target)
    }

    fn equality(&mut self) -> PResult<Expr> {
        self.left_assoc_binary(Self::comparison, &[TokenKind::EqualEqual, TokenKind::BangEqual])
    }

    fn comparison(&mut self) -> PResult<Expr> {
        self.left_assoc_binary(
            Self::term,
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
        )
    }

    fn term(&mut self) -> PResult<Expr> {
        self.left_assoc_binary(Self::factor, &[TokenKind::Plus, TokenKind::Minus])
    }

    fn factor(&mut self) -> PResult<Expr> {
        self.left_assoc_binary(Self::unary, &[TokenKind::Star, TokenKind::Slash])
    }

    /// Shared left-associative binary layer: parse one operand via
    /// `operand`, then fold in `(op operand)*` for any `op` in `kinds`.
    fn left_assoc_binary(
        &mut self,
        mut operand: impl FnMut(&mut Self) -> PResult<Expr>,
        kinds: &[TokenKind],
    ) -> PResult<Expr> {
        let mut left = operand(self)?;

        while kinds.contains(&self.peek().kind) {
            let op = self.advance().clone();
            let right = operand(self)?;
            left = Expr::Binary {
                left: Box::new(left),
                right: Box::new(right),
                op,
            };
        }

        Ok(left)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.check(TokenKind::Not) || self.check(TokenKind::Minus) {
            let op = self.advance().clone();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                operand: Box::new(operand),
                op,
            });
        }

        self.call()
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut callee = self.primary()?;

        while self.check(TokenKind::ParenL) {
            let paren_l = self.advance().clone();
            let args = self.arguments()?;
            self.expect(TokenKind::ParenR, "')' after call arguments")?;
            callee = Expr::Call {
                callee: Box::new(callee),
                args,
                paren_l,
            };
        }

        Ok(callee)
    }

    fn arguments(&mut self) -> PResult<Vec<Expr>> {
        if self.check(TokenKind::ParenR) {
            return Ok(Vec::new());
        }

        let mut error = None;
        let (args, trailing_comma) = parse_list(
            self,
            |p| {
                if error.is_some() || p.check(TokenKind::ParenR) {
                    return None;
                }
                match p.expression() {
                    Ok(e) => Some(e),
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
            return Err(self.error_here("Unexpected trailing comma in argument list"));
        }

        Ok(args)
    }

    fn primary(&mut self) -> PResult<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Integer => {
                self.advance();
                let Literal::Int(v) = token.literal.clone() else {
                    unreachable!("Integer token without an Int literal")
                };
                Ok(Expr::Literal { value: Value::Integer(v), token })
            }
            TokenKind::Decimal => {
                self.advance();
                let Literal::Float(v) = token.literal.clone() else {
                    unreachable!("Decimal token without a Float literal")
                };
                Ok(Expr::Literal { value: Value::Decimal(v), token })
            }
            TokenKind::Str => {
                self.advance();
                let Literal::Str(v) = token.literal.clone() else {
                    unreachable!("Str token without a Str literal")
                };
                Ok(Expr::Literal { value: Value::String(v), token })
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal { value: Value::Boolean(true), token })
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal { value: Value::Boolean(false), token })
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal { value: Value::Null, token })
            }
            TokenKind::Identifier => {
                self.advance();
                let lvalue = rill_ast::Lvalue {
                    line_of_ref: token.line,
                    name: token.lexeme.clone(),
                };
                Ok(Expr::Literal { value: Value::Lvalue(lvalue), token })
            }
            TokenKind::ParenL => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::ParenR, "')' after grouped expression")?;
                Ok(Expr::Grouping { inner: Box::new(inner) })
            }
            _ => Err(RillError::new(
                token.line,
                format!("Expected expression, got '{}'", token.representation()),
            )),
        }
    }
}
