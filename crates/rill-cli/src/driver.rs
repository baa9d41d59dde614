//! The driver callback itself, grounded on
//! `original_source/src/shell/InterpreterInterface.cpp`: install a
//! closure that pumps `Interpreter::step()` for one frame, printing
//! output as it's produced and errors as they're recorded, then invoke
//! it once against the freshly loaded program.
//!
//! The original signals "stop entirely" by throwing out of the
//! closure when `quit_on_error` is set; Rust closures stored as
//! `Rc<dyn Fn>` can't propagate an error that way; a shared `Cell`
//! flag serves the same purpose without needing `FnMut`/`RefCell`
//! machinery on the interpreter's driver slot.

use std::cell::Cell;
use std::rc::Rc;

use rill_ast::Stmt;
use rill_interp::{Interpreter, RuntimeStatus};

use crate::terminal::Terminal;

/// Loads `statements` and runs them to completion, printing output and
/// errors through `term`. Returns `true` if a runtime error occurred
/// while `quit_on_error` was set — the caller's cue to stop the run.
pub fn run_statements(
    interp: &mut Interpreter,
    term: Rc<Terminal>,
    statements: Vec<Stmt>,
    quit_on_error: bool,
) -> bool {
    interp.load_program(std::rc::Rc::from(statements));

    let quit = Rc::new(Cell::new(false));
    let quit_cb = quit.clone();

    interp.load_interface(Rc::new(move |interp: &mut Interpreter| loop {
        match interp.step() {
            RuntimeStatus::RanStatement => term.print(&interp.take_output()),
            RuntimeStatus::ClosedContext => return,
            RuntimeStatus::Error => {
                term.print_errors(interp.errors().iter());
                interp.reset_io();
                if quit_on_error {
                    quit_cb.set(true);
                }
                return;
            }
        }
    }));

    interp.run_interface();
    quit.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_ast::{Expr, Token, TokenKind, Value};

    fn print_stmt(n: i32) -> Stmt {
        Stmt::Print { line: 1, expr: Expr::Literal { value: Value::Integer(n), token: Token::new(TokenKind::Integer, 1) } }
    }

    #[test]
    fn successful_run_does_not_signal_quit() {
        let mut interp = Interpreter::new();
        let term = Rc::new(Terminal::new());
        let quit = run_statements(&mut interp, term, vec![print_stmt(1)], true);
        assert!(!quit);
    }

    #[test]
    fn runtime_error_with_quit_on_error_signals_quit() {
        let mut interp = Interpreter::new();
        let term = Rc::new(Terminal::new());
        let bad = Stmt::Return { line: 1, value: None };
        let quit = run_statements(&mut interp, term, vec![bad], true);
        assert!(quit);
    }

    #[test]
    fn runtime_error_without_quit_on_error_does_not_signal_quit() {
        let mut interp = Interpreter::new();
        let term = Rc::new(Terminal::new());
        let bad = Stmt::Return { line: 1, value: None };
        let quit = run_statements(&mut interp, term, vec![bad], false);
        assert!(!quit);
    }
}
