//! Expression AST nodes.
//!
//! Each variant exclusively owns its children. Grounded on the reference
//! implementation's `AST.hpp`, with the open-multimethod dispatch it uses
//! (`register_classes`/`define_method`) replaced by a plain tagged enum
//! matched on in `rill-interp`, per the spec's "tagged variant plus
//! dispatch function" design note.

use crate::{Token, Value};

/// A `rill` expression. Every variant carries (directly or via a child)
/// enough information to recover a representative source line through
/// [`Expr::line`].
#[derive(Debug, Clone)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        right: Box<Expr>,
        op: Token,
    },
    Unary {
        operand: Box<Expr>,
        op: Token,
    },
    Grouping {
        inner: Box<Expr>,
    },
    Literal {
        value: Value,
        token: Token,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
        equal: Token,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        paren_l: Token,
    },
}

impl Expr {
    /// A representative line number for this node. `Grouping` has no
    /// token of its own in the reference implementation, so its line is
    /// the line of the expression it wraps.
    pub fn line(&self) -> i32 {
        match self {
            Expr::Binary { op, .. } => op.line,
            Expr::Unary { op, .. } => op.line,
            Expr::Grouping { inner } => inner.line(),
            Expr::Literal { token, .. } => token.line,
            Expr::Assignment { equal, .. } => equal.line,
            Expr::Call { paren_l, .. } => paren_l.line,
        }
    }
}
