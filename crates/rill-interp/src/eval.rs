//! Expression evaluation, grounded on
//! `original_source/src/core/AstMethods/Evaluate.cpp`.
//!
//! Every entry point here returns a raw `Value`, possibly an
//! unresolved `Lvalue`. Callers are responsible for calling
//! [`extract_from_lvalue`] at the exact points spec'd: operands,
//! conditions, call arguments, print operands, and the right-hand side
//! of an assignment. `evaluate` itself only extracts where the
//! original does (both operands of a binary expression, the call
//! target, and the assignment's right-hand side) — it leaves its own
//! return value unextracted so a bare identifier expression still
//! yields an `Lvalue` to whoever consumes it next.

use rill_ast::{Expr, Lvalue, TokenClass, TokenKind, Value};
use rill_util::RillError;

use crate::environment::EnvHandle;
use crate::{Interpreter, PResult};

/// Resolves an `Lvalue` to its current value, or fails with
/// `UndefinedVariable` if the name isn't declared anywhere up the
/// parent chain. Any other value passes through unchanged.
pub fn extract_from_lvalue(value: Value, env: &EnvHandle) -> PResult<Value> {
    match value {
        Value::Lvalue(Lvalue { line_of_ref, name }) => env
            .get_var(&name)
            .ok_or_else(|| RillError::new(line_of_ref, format!("Use of undefined variable '{name}'"))),
        other => Ok(other),
    }
}

pub fn evaluate(expr: &Expr, interp: &mut Interpreter) -> PResult<Value> {
    match expr {
        Expr::Literal { value, .. } => Ok(value.clone()),
        Expr::Grouping { inner } => evaluate(inner, interp),
        Expr::Unary { operand, op } => evaluate_unary(operand, op, interp),
        Expr::Binary { left, right, op } => evaluate_binary(left, right, op, interp),
        Expr::Assignment { target, value, equal } => evaluate_assignment(target, value, equal, interp),
        Expr::Call { callee, args, paren_l } => evaluate_call(callee, args, paren_l, interp),
    }
}

fn evaluate_unary(operand: &Expr, op: &rill_ast::Token, interp: &mut Interpreter) -> PResult<Value> {
    let env = interp.current_env();
    let value = evaluate(operand, interp)?;
    let value = extract_from_lvalue(value, &env)?;

    match op.kind {
        TokenKind::Minus => {
            if !value.is_arithmetic() {
                return Err(RillError::new(
                    op.line,
                    format!("Expected numeric operand for '-'. Got {}", value.type_name()),
                ));
            }
            let star = rill_ast::Token::new(TokenKind::Star, op.line);
            numeric_binary(&star, &Value::Integer(-1), &value)
        }
        TokenKind::Not => match value {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(RillError::new(
                op.line,
                format!("Expected boolean operand for 'not'. Got {}", other.type_name()),
            )),
        },
        _ => unreachable!("parser never produces a unary operator other than '-'/'not'"),
    }
}

fn evaluate_binary(left: &Expr, right: &Expr, op: &rill_ast::Token, interp: &mut Interpreter) -> PResult<Value> {
    let env = interp.current_env();
    let left = evaluate(left, interp)?;
    let left = extract_from_lvalue(left, &env)?;
    let right = evaluate(right, interp)?;
    let right = extract_from_lvalue(right, &env)?;

    if matches!(op.kind, TokenKind::EqualEqual | TokenKind::BangEqual) {
        let eq = evaluate_equality(&left, &right, op)?;
        return Ok(Value::Boolean(eq ^ (op.kind == TokenKind::BangEqual)));
    }

    match op.kind.class() {
        TokenClass::Arithmetic | TokenClass::Comparison => {
            if let (Value::String(l), Value::String(r)) = (&left, &right) {
                string_binary(op, l, r)
            } else {
                numeric_binary(op, &left, &right)
            }
        }
        _ => unreachable!("parser never produces a non-arithmetic/comparison binary operator"),
    }
}

fn evaluate_assignment(
    target: &Expr,
    value: &Expr,
    equal: &rill_ast::Token,
    interp: &mut Interpreter,
) -> PResult<Value> {
    let env = interp.current_env();
    let target = evaluate(target, interp)?;

    let Value::Lvalue(lvalue) = target else {
        return Err(RillError::new(
            equal.line,
            format!("Expected lvalue for assignment target, got {} instead", target.type_name()),
        ));
    };

    // Resolve the name before the rhs runs, matching the reference
    // implementation's GetVar-then-evaluate order: an undefined target
    // fails before any rhs side effect takes place.
    if env.get_var(&lvalue.name).is_none() {
        return Err(RillError::new(
            lvalue.line_of_ref,
            format!("Use of undefined variable '{}'", lvalue.name),
        ));
    }

    let rhs = evaluate(value, interp)?;
    let rhs = extract_from_lvalue(rhs, &env)?;

    env.assign_var(&lvalue.name, rhs.clone(), equal.line);

    Ok(rhs)
}

fn evaluate_call(callee: &Expr, args: &[Expr], paren_l: &rill_ast::Token, interp: &mut Interpreter) -> PResult<Value> {
    let env = interp.current_env();
    let callee_val = evaluate(callee, interp)?;
    let callee_val = extract_from_lvalue(callee_val, &env)?;

    let Value::Function(function) = callee_val else {
        return Err(RillError::new(
            paren_l.line,
            format!("Attempt to treat {} as function in call expression", callee_val.describe()),
        ));
    };

    if function.arity() != args.len() {
        return Err(RillError::new(
            paren_l.line,
            format!(
                "Number of arguments ({}) to function call does not match number of parameters ({}).\nNote: Function defined on line {}.",
                args.len(),
                function.arity(),
                function.line
            ),
        ));
    }

    let mut arg_values = Vec::with_capacity(args.len());
    for arg in args {
        let v = evaluate(arg, interp)?;
        arg_values.push(extract_from_lvalue(v, &env)?);
    }

    interp.call_function(&function, arg_values);
    Ok(interp.pop_return())
}

/// Dispatches `op` between same-typed `left`/`right`, attempting
/// Integer/Integer or Decimal/Decimal directly and promoting a mixed
/// Integer/Decimal pair to Decimal/Decimal first.
fn numeric_binary(op: &rill_ast::Token, left: &Value, right: &Value) -> PResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_binary(op, *a, *b),
        (Value::Decimal(a), Value::Decimal(b)) => decimal_binary(op, *a, *b),
        (Value::Integer(a), Value::Decimal(b)) => decimal_binary(op, *a as f32, *b),
        (Value::Decimal(a), Value::Integer(b)) => decimal_binary(op, *a, *b as f32),
        _ => Err(RillError::new(
            op.line,
            format!(
                "Can't perform numeric conversion for '{}' between types {} and {}",
                op.representation(),
                left.type_name(),
                right.type_name()
            ),
        )),
    }
}

fn integer_binary(op: &rill_ast::Token, l: i32, r: i32) -> PResult<Value> {
    use TokenKind::*;
    Ok(match op.kind {
        Plus => Value::Integer(l.wrapping_add(r)),
        Minus => Value::Integer(l.wrapping_sub(r)),
        Star => Value::Integer(l.wrapping_mul(r)),
        Slash => {
            if r == 0 {
                return Err(RillError::new(op.line, "Integer division by zero"));
            }
            Value::Integer(l / r)
        }
        Percent => {
            if r == 0 {
                return Err(RillError::new(op.line, "Integer division by zero"));
            }
            Value::Integer(l % r)
        }
        StarStar => Value::Integer(integer_power(l, r)),
        Greater => Value::Boolean(l > r),
        GreaterEqual => Value::Boolean(l >= r),
        Less => Value::Boolean(l < r),
        LessEqual => Value::Boolean(l <= r),
        _ => return Err(invalid_binary_op(op, "Integer", "Integer")),
    })
}

/// `r == 0 -> 1`, `r == 1 -> l`, `l == 0 -> 0`, else repeated
/// multiplication — matches the reference implementation's special
/// cases exactly.
fn integer_power(l: i32, r: i32) -> i32 {
    if r == 0 {
        return 1;
    }
    if r == 1 {
        return l;
    }
    if l == 0 {
        return 0;
    }
    let mut val = l;
    for _ in 1..r {
        val = val.wrapping_mul(l);
    }
    val
}

fn decimal_binary(op: &rill_ast::Token, l: f32, r: f32) -> PResult<Value> {
    use TokenKind::*;
    Ok(match op.kind {
        Plus => Value::Decimal(l + r),
        Minus => Value::Decimal(l - r),
        Star => Value::Decimal(l * r),
        Slash => Value::Decimal(l / r),
        StarStar => Value::Decimal(l.powf(r)),
        Greater => Value::Boolean(l > r),
        GreaterEqual => Value::Boolean(l >= r),
        Less => Value::Boolean(l < r),
        LessEqual => Value::Boolean(l <= r),
        _ => return Err(invalid_binary_op(op, "Decimal", "Decimal")),
    })
}

fn string_binary(op: &rill_ast::Token, l: &str, r: &str) -> PResult<Value> {
    use TokenKind::*;
    Ok(match op.kind {
        Plus => Value::String(format!("{l}{r}")),
        Greater => Value::Boolean(l > r),
        GreaterEqual => Value::Boolean(l >= r),
        Less => Value::Boolean(l < r),
        LessEqual => Value::Boolean(l <= r),
        _ => return Err(invalid_binary_op(op, "String", "String")),
    })
}

fn invalid_binary_op(op: &rill_ast::Token, left_ty: &str, right_ty: &str) -> RillError {
    RillError::new(
        op.line,
        format!("Invalid binary operator {} for types {left_ty} and {right_ty}", op.representation()),
    )
}

/// Same-type pointwise comparison; `Null == Null` is true, `Function`
/// equality always errors, and cross-type comparisons fall back to
/// `Null`-is-never-equal or numeric promotion.
fn evaluate_equality(left: &Value, right: &Value, op: &rill_ast::Token) -> PResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Decimal(a), Value::Decimal(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(a == b),
        (Value::Null, Value::Null) => Ok(true),
        (Value::Function(_), Value::Function(_)) => {
            Err(RillError::new(op.line, "Function unhandled in equality"))
        }
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        _ if left.is_arithmetic() && right.is_arithmetic() => {
            let (a, b) = (numeric_as_f32(left), numeric_as_f32(right));
            Ok(a == b)
        }
        _ => Err(RillError::new(
            op.line,
            format!(
                "Invalid '{}' comparison of types {} and {}",
                op.representation(),
                left.type_name(),
                right.type_name()
            ),
        )),
    }
}

fn numeric_as_f32(v: &Value) -> f32 {
    match v {
        Value::Integer(i) => *i as f32,
        Value::Decimal(d) => *d,
        _ => unreachable!("caller already checked is_arithmetic"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(kind: TokenKind) -> rill_ast::Token {
        rill_ast::Token::new(kind, 1)
    }

    #[test]
    fn integer_addition() {
        let v = integer_binary(&tok(TokenKind::Plus), 2, 3).unwrap();
        assert!(matches!(v, Value::Integer(5)));
    }

    #[test]
    fn integer_division_by_zero_errors() {
        assert!(integer_binary(&tok(TokenKind::Slash), 1, 0).is_err());
    }

    #[test]
    fn decimal_division_by_zero_is_infinity() {
        let v = decimal_binary(&tok(TokenKind::Slash), 1.0, 0.0).unwrap();
        assert!(matches!(v, Value::Decimal(d) if d.is_infinite()));
    }

    #[test]
    fn integer_power_special_cases() {
        assert_eq!(integer_power(5, 0), 1);
        assert_eq!(integer_power(5, 1), 5);
        assert_eq!(integer_power(0, 3), 0);
        assert_eq!(integer_power(2, 3), 8);
    }

    #[test]
    fn equality_null_is_reflexive_but_not_with_zero() {
        let op = tok(TokenKind::EqualEqual);
        assert!(evaluate_equality(&Value::Null, &Value::Null, &op).unwrap());
        assert!(!evaluate_equality(&Value::Null, &Value::Integer(0), &op).unwrap());
    }

    #[test]
    fn equality_promotes_mixed_arithmetic() {
        let op = tok(TokenKind::EqualEqual);
        assert!(evaluate_equality(&Value::Integer(1), &Value::Decimal(1.0), &op).unwrap());
    }

    #[test]
    fn function_equality_errors() {
        let op = tok(TokenKind::EqualEqual);
        let f = Value::Function(rill_ast::Function {
            line: 1,
            name: "f".into(),
            params: vec![],
            body: std::rc::Rc::from(Vec::new()),
        });
        assert!(evaluate_equality(&f, &f, &op).is_err());
    }

    #[test]
    fn string_concatenation() {
        let v = string_binary(&tok(TokenKind::Plus), "ab", "cd").unwrap();
        assert!(matches!(v, Value::String(s) if s == "abcd"));
    }

    #[test]
    fn string_subtraction_is_invalid() {
        assert!(string_binary(&tok(TokenKind::Minus), "a", "b").is_err());
    }
}
