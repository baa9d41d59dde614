//! Call-stack frames, grounded on
//! `original_source/src/core/ExecutionContext.cpp`/`.hpp`.

use std::rc::Rc;

use rill_ast::Stmt;

use crate::environment::EnvHandle;

/// What kind of call-stack frame this is. `Script` marks the bottom
/// frame (returning out of it is an error); `Function` marks a frame a
/// `Return` should unwind to; `Scope` is an ordinary block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Script,
    Function,
    Scope,
}

/// One element of the interpreter's call stack: a non-owning (here,
/// reference-counted) span of statements, a cursor into it, and its own
/// lexical environment.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub id: usize,
    pub kind: FrameKind,
    pub statements: Rc<[Stmt]>,
    pub cur_pos: usize,
    pub environment: EnvHandle,
}

impl ExecutionContext {
    pub fn new(id: usize, kind: FrameKind, statements: Rc<[Stmt]>, environment: EnvHandle) -> Self {
        Self {
            id,
            kind,
            statements,
            cur_pos: 0,
            environment,
        }
    }
}

/// The outcome of running exactly one statement in the top frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Close,
    ExitFunction,
    Error,
}
