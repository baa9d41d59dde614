//! rill-util - Shared infrastructure for the `rill` interpreter workspace.
//!
//! Holds the error/diagnostic record shared by the lexer, parser, and
//! interpreter, plus a small bounds-checked stack used for the
//! interpreter's call stack. Nothing in this crate knows about `rill`'s
//! token, AST, or value types — it is pure plumbing, the way the
//! teacher's `-util` crate underlies every phase of its pipeline.

mod call_stack;
mod error;

pub use call_stack::CallStack;
pub use error::{ErrorList, RillError};
