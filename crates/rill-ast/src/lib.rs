//! rill-ast - Token, value, and AST node definitions shared by the lexer,
//! parser, and evaluator.
//!
//! This crate owns the data model (spec §3 in the design doc): it has no
//! scanning or parsing logic of its own, only the types every other
//! pipeline stage passes between each other.

mod expr;
mod stmt;
mod token;
mod value;

pub use expr::Expr;
pub use stmt::Stmt;
pub use token::{keyword_or_identifier, Literal, Token, TokenClass, TokenKind};
pub use value::{Function, Lvalue, Value};
