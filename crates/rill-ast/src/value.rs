//! The runtime value model: a tagged union over the kinds a `rill`
//! expression can evaluate to, plus the two special kinds —
//! [`Lvalue`] and [`Function`] — that need more than a bare payload.
//!
//! Grounded on the reference implementation's `Value.hpp`/`Value.cpp`:
//! same variant set, same `ToString`/`ToPrettyString` pair (here
//! `Display` and [`Value::describe`]).

use std::fmt;
use std::rc::Rc;

use crate::Stmt;

/// A reference to a variable by name, produced by evaluating an
/// identifier literal. Must be resolved against the current environment
/// (via `ExtractFromLV` in `rill-interp`) before it reaches arithmetic,
/// comparison, assignment, printing, a condition, or a call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lvalue {
    pub line_of_ref: i32,
    pub name: String,
}

/// A callable function value: its declaration line, name, ordered
/// parameter names, and a shared (non-owning, in spirit) reference to its
/// body. The body is reference-counted rather than borrowed so that a
/// `Function` value can be stored in an environment, copied into call
/// arguments, and invoked recursively without fighting the borrow
/// checker over the lifetime of the program's AST.
#[derive(Debug, Clone)]
pub struct Function {
    pub line: i32,
    pub name: String,
    pub params: Vec<String>,
    pub body: Rc<[Stmt]>,
}

impl Function {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A `rill` runtime value. The tag and payload always agree: there is no
/// way to construct a `Value` whose variant disagrees with its data.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i32),
    Decimal(f32),
    String(String),
    Boolean(bool),
    Lvalue(Lvalue),
    Function(Function),
}

impl Value {
    /// True for `Integer` and `Decimal` only.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Decimal(_))
    }

    /// True only for `Boolean(true)` — not a general truthiness test.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }

    pub fn is_lvalue(&self) -> bool {
        matches!(self, Value::Lvalue(_))
    }

    /// The type name used in error messages (`"Integer"`, `"Function"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Boolean(_) => "Boolean",
            Value::Lvalue(_) => "Lvalue",
            Value::Function(_) => "Function",
        }
    }

    /// A type-prefixed rendering used inside error messages (e.g. "Attempt
    /// to treat Integer: 3 as function"), distinct from the plain `print`
    /// rendering given by `Display`.
    pub fn describe(&self) -> String {
        match self {
            Value::Function(_) => self.to_string(),
            Value::Null => "(null)".to_string(),
            _ => format!("{}: {}", self.type_name(), self),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Lvalue(lv) => write!(f, "{}", lv.name),
            Value::Function(func) => write!(f, "[Function: {}]", func.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_print_contract() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
    }

    #[test]
    fn function_display_uses_bracket_form() {
        let f = Function {
            line: 1,
            name: "add".into(),
            params: vec![],
            body: Rc::from(Vec::<Stmt>::new()),
        };
        assert_eq!(Value::Function(f).to_string(), "[Function: add]");
    }

    #[test]
    fn is_true_rejects_non_boolean() {
        assert!(!Value::Integer(1).is_true());
        assert!(Value::Boolean(true).is_true());
        assert!(!Value::Boolean(false).is_true());
    }
}
