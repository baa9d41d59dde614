//! rill-interp - The tree-walking core: environments, the evaluator,
//! the statement executor, and the stepping execution engine that ties
//! them together behind the `Interpreter` facade.
//!
//! Grounded on `original_source/src/core/Interpreter.cpp`/`.hpp` for the
//! facade's shape (a call stack of contexts, a pending-return stack,
//! in-memory I/O buffers, and a driver callback for nested frame
//! pumping) and on `AstMethods/Evaluate.cpp`/`Statement.cpp` for the
//! evaluator and executor this module re-exports.

mod context;
mod environment;
mod eval;
mod exec;

pub use context::{ExecutionContext, ExecutionStatus, FrameKind};
pub use environment::EnvHandle;
pub use eval::evaluate;
pub use exec::{exec_stmt, StatementEffect};

use std::rc::Rc;

use rill_ast::{Function, Stmt, Value};
use rill_util::{CallStack, ErrorList, RillError};

pub type PResult<T> = Result<T, RillError>;

/// The event surface `step` yields between statements, named directly
/// after the reference implementation's status sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStatus {
    RanStatement,
    ClosedContext,
    Error,
}

/// Pumps `interp.step()` until the current top frame closes or a
/// runtime error is recorded. Installed as the default driver callback;
/// a front-end wanting to observe statement boundaries (e.g. to flush
/// output after every `RanStatement`) installs its own via
/// [`Interpreter::load_interface`] instead.
pub fn default_driver(interp: &mut Interpreter) {
    loop {
        match interp.step() {
            RuntimeStatus::RanStatement => continue,
            RuntimeStatus::ClosedContext | RuntimeStatus::Error => return,
        }
    }
}

/// The interpreter core: a call stack of execution contexts, a pending
/// return-value stack, in-memory I/O buffers, an accumulating error
/// list, the return-unwind flag, and a driver callback for nested frame
/// pumping. Not thread-safe — a single driver owns it for its lifetime.
pub struct Interpreter {
    call_stack: CallStack<ExecutionContext>,
    return_values: Vec<Value>,
    input: String,
    output: String,
    errors: ErrorList,
    is_exiting_function: bool,
    global_env: EnvHandle,
    driver: Option<Rc<dyn Fn(&mut Interpreter)>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let global_env = EnvHandle::root();
        Self {
            call_stack: CallStack::new(),
            return_values: Vec::new(),
            input: String::new(),
            output: String::new(),
            errors: ErrorList::new(),
            is_exiting_function: false,
            global_env: global_env.clone(),
            driver: Some(Rc::new(default_driver)),
        }
    }

    /// Registers the driver callback used whenever the core pushes a
    /// new frame (entering a block or calling a function).
    pub fn load_interface(&mut self, callback: Rc<dyn Fn(&mut Interpreter)>) {
        self.driver = Some(callback);
    }

    /// Resets the call stack to a single Script frame over `statements`,
    /// parented on a fresh global environment. Call once per program run.
    pub fn load_program(&mut self, statements: Rc<[Stmt]>) {
        self.global_env = EnvHandle::root();
        self.call_stack.clear();
        self.return_values.clear();
        self.is_exiting_function = false;
        self.call_stack.push(ExecutionContext::new(0, FrameKind::Script, statements, self.global_env.clone()));
    }

    /// Invokes the installed driver against the current top frame.
    /// `push_context` calls this automatically for a frame it just
    /// pushed; a front-end calls it once itself after `load_program` to
    /// drive the outermost frame the same way.
    pub fn run_interface(&mut self) {
        if let Some(driver) = self.driver.clone() {
            driver(self);
        }
    }

    /// Runs the top frame to completion using the default driver,
    /// ignoring whatever was installed via `load_interface`. Handy for
    /// tests and embeddings that don't care about per-statement output
    /// draining.
    pub fn run_to_completion(&mut self) {
        default_driver(self);
    }

    /// Advances execution by exactly one statement-boundary event.
    pub fn step(&mut self) -> RuntimeStatus {
        if !self.is_exiting_function {
            return match self.execute_one_top() {
                ExecutionStatus::Success => RuntimeStatus::RanStatement,
                ExecutionStatus::Close => {
                    self.call_stack.pop();
                    RuntimeStatus::ClosedContext
                }
                ExecutionStatus::ExitFunction => RuntimeStatus::RanStatement,
                ExecutionStatus::Error => RuntimeStatus::Error,
            };
        }

        let Some(top) = self.call_stack.top() else {
            return RuntimeStatus::Error;
        };

        if top.kind == FrameKind::Script {
            self.errors.push(0, "Returning from top-level not implemented");
            return RuntimeStatus::Error;
        }

        self.is_exiting_function = top.kind != FrameKind::Function;
        self.call_stack.pop();
        RuntimeStatus::ClosedContext
    }

    /// Runs exactly one statement of the top frame, catching any
    /// runtime error and recording it rather than propagating it —
    /// matches the reference engine's "the statement boundary is where
    /// errors get caught" behavior.
    fn execute_one_top(&mut self) -> ExecutionStatus {
        let Some(top) = self.call_stack.top() else {
            return ExecutionStatus::Close;
        };
        let cur_pos = top.cur_pos;
        let statements = top.statements.clone();

        if cur_pos >= statements.len() {
            return ExecutionStatus::Close;
        }

        if let Some(top) = self.call_stack.top_mut() {
            top.cur_pos = cur_pos + 1;
        }

        let line = statements[cur_pos].line();
        tracing::trace!(depth = self.call_stack.depth(), line, "pumping statement");

        let result = match exec_stmt(&statements[cur_pos], self) {
            Ok(StatementEffect::CloseContext) => {
                if self.is_exiting_function {
                    ExecutionStatus::ExitFunction
                } else {
                    ExecutionStatus::Close
                }
            }
            Ok(_) => ExecutionStatus::Success,
            Err(e) => {
                tracing::debug!(line = e.line, message = %e.message, "runtime error");
                self.errors.push_error(e);
                ExecutionStatus::Error
            }
        };

        // A nested frame (pumped to completion inside `exec_stmt` via
        // `push_context`) may have recorded an error of its own without
        // this call itself returning `Err` — e.g. a block or call whose
        // body faulted partway through. Any recorded error halts the run.
        if !self.errors.is_empty() {
            return ExecutionStatus::Error;
        }

        result
    }

    /// Pushes a child frame and, if a driver is installed, immediately
    /// pumps it to completion — the "cooperative recursion over frames"
    /// design that lets a block or call run to its end before the
    /// pushing statement returns.
    pub fn push_context(&mut self, kind: FrameKind, statements: Rc<[Stmt]>, environment: EnvHandle) {
        let id = self.call_stack.depth();
        tracing::trace!(id, ?kind, "pushing context");
        self.call_stack.push(ExecutionContext::new(id, kind, statements, environment));
        self.run_interface();
    }

    /// Binds `args` to `function`'s parameters in declaration order,
    /// in a frame parented on the interpreter's global environment —
    /// never the calling environment, so functions capture only global
    /// bindings visible at call time.
    pub fn call_function(&mut self, function: &Function, args: Vec<Value>) {
        let env = self.global_env.make_child();
        for (param, arg) in function.params.iter().zip(args) {
            env.create_or_assign_var(param, arg, function.line);
        }
        self.push_context(FrameKind::Function, function.body.clone(), env);
    }

    pub fn pop_context(&mut self) -> Option<ExecutionContext> {
        self.call_stack.pop()
    }

    /// The environment of the current top frame.
    pub fn current_env(&self) -> EnvHandle {
        self.call_stack.top().expect("current_env called with an empty call stack").environment.clone()
    }

    pub fn push_return(&mut self, value: Value) {
        self.return_values.push(value);
    }

    /// Pops the most recent return value, defaulting to `Null` if none
    /// was pushed (a function whose body never ran to a `Return`, which
    /// shouldn't happen given the parser's synthetic `return;`, but
    /// matches the reference's `PopReturn`'s fallback).
    pub fn pop_return(&mut self) -> Value {
        self.return_values.pop().unwrap_or(Value::Null)
    }

    pub fn is_exiting_function(&self) -> bool {
        self.is_exiting_function
    }

    fn mark_exiting_function(&mut self) {
        self.is_exiting_function = true;
    }

    pub fn give_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub fn give_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn reset_io(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_ast::{Literal, Token, TokenKind};

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, 1)
    }

    #[test]
    fn print_then_var_decl_share_output_and_environment() {
        let ident = Token::with_lexeme(TokenKind::Identifier, 1, "x".into(), Literal::None);
        let statements: Rc<[Stmt]> = Rc::from(vec![
            Stmt::VarDecl {
                line: 1,
                identifier: ident,
                value: rill_ast::Expr::Literal { value: Value::Integer(5), token: tok(TokenKind::Integer) },
            },
            Stmt::Print {
                line: 2,
                expr: rill_ast::Expr::Literal {
                    value: Value::Lvalue(rill_ast::Lvalue { line_of_ref: 2, name: "x".into() }),
                    token: tok(TokenKind::Identifier),
                },
            },
        ]);

        let mut interp = Interpreter::new();
        interp.load_program(statements);
        interp.run_to_completion();

        assert!(!interp.has_errors());
        assert_eq!(interp.take_output(), "5\n");
    }

    #[test]
    fn returning_from_the_script_frame_is_an_error() {
        let statements: Rc<[Stmt]> = Rc::from(vec![Stmt::Return { line: 1, value: None }]);
        let mut interp = Interpreter::new();
        interp.load_program(statements);
        interp.run_to_completion();
        assert!(interp.has_errors());
    }

    #[test]
    fn block_opens_and_closes_a_child_scope() {
        let ident = Token::with_lexeme(TokenKind::Identifier, 1, "y".into(), Literal::None);
        let inner: Rc<[Stmt]> = Rc::from(vec![Stmt::VarDecl {
            line: 1,
            identifier: ident,
            value: rill_ast::Expr::Literal { value: Value::Integer(1), token: tok(TokenKind::Integer) },
        }]);
        let statements: Rc<[Stmt]> = Rc::from(vec![Stmt::Block {
            open: tok(TokenKind::BraceL),
            close: tok(TokenKind::BraceR),
            statements: inner,
        }]);

        let mut interp = Interpreter::new();
        interp.load_program(statements);
        interp.run_to_completion();

        assert!(!interp.has_errors());
        assert!(interp.current_env().get_var("y").is_none());
    }
}
