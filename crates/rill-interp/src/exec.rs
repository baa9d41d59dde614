//! Statement execution, grounded on `original_source/src/core/Statement.cpp`.
//!
//! Each statement is executed against the interpreter's current top
//! frame and reports a [`StatementEffect`] describing what the engine
//! should do next: keep stepping through this frame, open a new frame
//! (`Block`/`Func`'s implicit call), close the current frame (`Return`),
//! or do nothing special (everything else).

use rill_ast::Stmt;
use rill_util::RillError;

use crate::context::FrameKind;
use crate::eval::{evaluate, extract_from_lvalue};
use crate::{Interpreter, PResult};

/// What the engine should do after running one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementEffect {
    None,
    OpenContext,
    CloseContext,
}

pub fn exec_stmt(stmt: &Stmt, interp: &mut Interpreter) -> PResult<StatementEffect> {
    match stmt {
        Stmt::Expr { expr, .. } => {
            let env = interp.current_env();
            let value = evaluate(expr, interp)?;
            extract_from_lvalue(value, &env)?;
            Ok(StatementEffect::None)
        }
        Stmt::Print { expr, .. } => {
            let env = interp.current_env();
            let value = evaluate(expr, interp)?;
            let value = extract_from_lvalue(value, &env)?;
            interp.give_output(&format!("{value}\n"));
            Ok(StatementEffect::None)
        }
        Stmt::VarDecl { line, identifier, value } => {
            let env = interp.current_env();
            let evaluated = evaluate(value, interp)?;
            let evaluated = extract_from_lvalue(evaluated, &env)?;
            env.create_or_assign_var(&identifier.lexeme, evaluated, *line);
            Ok(StatementEffect::None)
        }
        Stmt::Block { statements, .. } => {
            let child = interp.current_env().make_child();
            interp.push_context(FrameKind::Scope, statements.clone(), child);
            Ok(StatementEffect::OpenContext)
        }
        Stmt::If { condition, yes_branch, no_branch, if_token, .. } => {
            exec_if(condition, yes_branch, no_branch.as_deref(), if_token, interp)
        }
        Stmt::Func { name_token, params, statements, .. } => {
            let env = interp.current_env();
            let function = rill_ast::Function {
                line: name_token.line,
                name: name_token.lexeme.clone(),
                params: params.iter().map(|t| t.lexeme.clone()).collect(),
                body: statements.clone(),
            };
            env.create_or_assign_var(
                &name_token.lexeme,
                rill_ast::Value::Function(function),
                name_token.line,
            );
            Ok(StatementEffect::None)
        }
        Stmt::Return { value, .. } => {
            let env = interp.current_env();
            let result = match value {
                Some(expr) => {
                    let v = evaluate(expr, interp)?;
                    extract_from_lvalue(v, &env)?
                }
                None => rill_ast::Value::Null,
            };
            interp.push_return(result);
            interp.mark_exiting_function();
            Ok(StatementEffect::CloseContext)
        }
    }
}

/// An `if`/`else` branch is itself a single statement, executed directly
/// against the current frame — a bare branch does not get a scope of its
/// own. Only when the branch is a `Block` does `exec_stmt`'s own `Block`
/// arm push a child scope, exactly as it would for that `Block` anywhere
/// else in the grammar.
fn exec_if(
    condition: &rill_ast::Expr,
    yes_branch: &Stmt,
    no_branch: Option<&Stmt>,
    if_token: &rill_ast::Token,
    interp: &mut Interpreter,
) -> PResult<StatementEffect> {
    let env = interp.current_env();
    let value = evaluate(condition, interp)?;
    let value = extract_from_lvalue(value, &env)?;

    let rill_ast::Value::Boolean(cond) = value else {
        return Err(RillError::new(
            if_token.line,
            format!("Expected boolean for if condition, got {} instead", value.describe()),
        ));
    };

    if cond {
        exec_stmt(yes_branch, interp)
    } else if let Some(no_branch) = no_branch {
        exec_stmt(no_branch, interp)
    } else {
        Ok(StatementEffect::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_ast::{Expr, Literal, Token, TokenKind, Value};

    fn lit(value: Value) -> Expr {
        Expr::Literal { value, token: Token::new(TokenKind::Integer, 1) }
    }

    #[test]
    fn print_statement_writes_newline_terminated_output() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let stmt = Stmt::Print { line: 1, expr: lit(Value::Integer(42)) };
        exec_stmt(&stmt, &mut interp).unwrap();
        assert_eq!(interp.take_output(), "42\n");
    }

    #[test]
    fn var_decl_binds_in_current_environment() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let ident = Token::with_lexeme(TokenKind::Identifier, 1, "x".into(), Literal::None);
        let stmt = Stmt::VarDecl { line: 1, identifier: ident, value: lit(Value::Integer(7)) };
        exec_stmt(&stmt, &mut interp).unwrap();
        assert!(matches!(interp.current_env().get_var("x"), Some(Value::Integer(7))));
    }

    #[test]
    fn if_with_non_boolean_condition_errors() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let if_token = Token::new(TokenKind::If, 3);
        let stmt = Stmt::If {
            if_token,
            else_token: None,
            condition: lit(Value::Integer(1)),
            yes_branch: Box::new(Stmt::Print { line: 3, expr: lit(Value::Null) }),
            no_branch: None,
        };
        assert!(exec_stmt(&stmt, &mut interp).is_err());
    }

    #[test]
    fn bare_if_branch_declares_into_the_enclosing_scope() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let if_token = Token::new(TokenKind::If, 1);
        let ident = Token::with_lexeme(TokenKind::Identifier, 1, "x".into(), Literal::None);
        let stmt = Stmt::If {
            if_token,
            else_token: None,
            condition: lit(Value::Boolean(true)),
            yes_branch: Box::new(Stmt::VarDecl { line: 1, identifier: ident, value: lit(Value::Integer(5)) }),
            no_branch: None,
        };
        let effect = exec_stmt(&stmt, &mut interp).unwrap();
        assert_eq!(effect, StatementEffect::None);
        assert!(matches!(interp.current_env().get_var("x"), Some(Value::Integer(5))));
    }

    #[test]
    fn block_if_branch_still_scopes_its_own_declarations() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let if_token = Token::new(TokenKind::If, 1);
        let ident = Token::with_lexeme(TokenKind::Identifier, 1, "x".into(), Literal::None);
        let inner: std::rc::Rc<[Stmt]> =
            std::rc::Rc::from(vec![Stmt::VarDecl { line: 1, identifier: ident, value: lit(Value::Integer(5)) }]);
        let stmt = Stmt::If {
            if_token,
            else_token: None,
            condition: lit(Value::Boolean(true)),
            yes_branch: Box::new(Stmt::Block {
                open: Token::new(TokenKind::BraceL, 1),
                close: Token::new(TokenKind::BraceR, 1),
                statements: inner,
            }),
            no_branch: None,
        };
        let effect = exec_stmt(&stmt, &mut interp).unwrap();
        assert_eq!(effect, StatementEffect::OpenContext);
        assert!(interp.current_env().get_var("x").is_none());
    }

    #[test]
    fn block_reports_open_context() {
        let mut interp = Interpreter::new();
        interp.load_program(std::rc::Rc::from(vec![]));
        let open = Token::new(TokenKind::BraceL, 1);
        let close = Token::new(TokenKind::BraceR, 1);
        let stmt = Stmt::Block { open, close, statements: std::rc::Rc::from(vec![]) };
        let effect = exec_stmt(&stmt, &mut interp).unwrap();
        assert_eq!(effect, StatementEffect::OpenContext);
    }
}
