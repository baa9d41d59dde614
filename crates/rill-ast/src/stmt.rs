//! Statement AST nodes.
//!
//! `Block` and `Func` bodies are `Rc<[Stmt]>` rather than `Vec<Stmt>`:
//! both need to be handed to the execution engine as a span the engine
//! can push a frame over and, in the `Func` case, the same span must
//! outlive any one call so the function can be invoked (and recurse)
//! many times. Reference counting is the idiomatic stand-in for the
//! reference implementation's non-owning `std::span` into an AST the
//! driver keeps alive for the run's duration.

use std::rc::Rc;

use crate::{Expr, Token};

#[derive(Debug, Clone)]
pub enum Stmt {
    Expr {
        line: i32,
        expr: Expr,
    },
    Print {
        line: i32,
        expr: Expr,
    },
    VarDecl {
        line: i32,
        identifier: Token,
        value: Expr,
    },
    Block {
        open: Token,
        close: Token,
        statements: Rc<[Stmt]>,
    },
    If {
        if_token: Token,
        else_token: Option<Token>,
        condition: Expr,
        yes_branch: Box<Stmt>,
        no_branch: Option<Box<Stmt>>,
    },
    Func {
        func_token: Token,
        name_token: Token,
        params: Vec<Token>,
        statements: Rc<[Stmt]>,
    },
    Return {
        line: i32,
        value: Option<Expr>,
    },
}

impl Stmt {
    pub fn line(&self) -> i32 {
        match self {
            Stmt::Expr { line, .. } => *line,
            Stmt::Print { line, .. } => *line,
            Stmt::VarDecl { line, .. } => *line,
            Stmt::Block { open, .. } => open.line,
            Stmt::If { if_token, .. } => if_token.line,
            Stmt::Func { func_token, .. } => func_token.line,
            Stmt::Return { line, .. } => *line,
        }
    }

    /// True for a bare `Return` (used by the parser to decide whether a
    /// synthetic `return;` must be appended to a function body).
    pub fn is_return(&self) -> bool {
        matches!(self, Stmt::Return { .. })
    }
}
