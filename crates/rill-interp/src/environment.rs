//! Lexical environments: a name-to-slot map with a parent pointer,
//! grounded on `original_source/src/core/Environment.cpp`.
//!
//! The reference implementation's `Environment` holds a non-owning
//! `parent` pointer and relies on the call stack to keep parents alive
//! longer than their children. Rust has no equivalent of "this raw
//! pointer happens to always be valid" without `unsafe`, so each
//! environment is `Rc<RefCell<Environment>>`-shared instead: cheap to
//! clone into a child's parent slot, and `RefCell` gives the interior
//! mutability `CreateOrAssignVar`/assignment need without threading a
//! `&mut` chain back up through however many frames are nested.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rill_ast::Value;

/// A declared variable's runtime record. `line_of_decl` never changes
/// after insertion; `line_of_last_assign` is updated by every
/// subsequent assignment (including the declaration itself).
#[derive(Debug, Clone)]
pub struct VarSlot {
    pub value: Value,
    pub line_of_decl: i32,
    pub line_of_last_assign: i32,
}

#[derive(Debug)]
struct Environment {
    vars: IndexMap<String, VarSlot>,
    parent: Option<EnvHandle>,
}

/// A shared handle to an [`Environment`]. Cloning an `EnvHandle` clones
/// the `Rc`, not the environment — all handles to the same frame
/// observe the same variables.
#[derive(Debug, Clone)]
pub struct EnvHandle(Rc<RefCell<Environment>>);

impl EnvHandle {
    pub fn root() -> Self {
        EnvHandle(Rc::new(RefCell::new(Environment {
            vars: IndexMap::new(),
            parent: None,
        })))
    }

    /// Produces a new environment whose parent is `self`.
    pub fn make_child(&self) -> Self {
        EnvHandle(Rc::new(RefCell::new(Environment {
            vars: IndexMap::new(),
            parent: Some(self.clone()),
        })))
    }

    /// Searches this environment, then its parent chain, returning a
    /// clone of the stored value.
    pub fn get_var(&self, name: &str) -> Option<Value> {
        if let Some(slot) = self.0.borrow().vars.get(name) {
            return Some(slot.value.clone());
        }
        let parent = self.0.borrow().parent.clone();
        parent.and_then(|p| p.get_var(name))
    }

    /// Mutates the slot for `name` wherever it is found along the
    /// parent chain, returning whether a slot was found. Used by
    /// assignment, which must reach whichever scope actually declared
    /// the variable rather than always shadowing locally.
    pub fn assign_var(&self, name: &str, value: Value, line: i32) -> bool {
        if self.0.borrow().vars.contains_key(name) {
            let mut env = self.0.borrow_mut();
            let slot = env.vars.get_mut(name).unwrap();
            slot.value = value;
            slot.line_of_last_assign = line;
            return true;
        }
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(p) => p.assign_var(name, value, line),
            None => false,
        }
    }

    /// In-place mutates the slot for `name` if it exists **in this
    /// environment only** (no parent-chain walk), else inserts a new
    /// one. Used by `var` declarations and by function-call parameter
    /// binding, both of which always target the current scope.
    pub fn create_or_assign_var(&self, name: &str, value: Value, line: i32) {
        let mut env = self.0.borrow_mut();
        match env.vars.get_mut(name) {
            Some(slot) => {
                slot.value = value;
                slot.line_of_last_assign = line;
            }
            None => {
                env.vars.insert(
                    name.to_string(),
                    VarSlot {
                        value,
                        line_of_decl: line,
                        line_of_last_assign: line,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_and_reads_local_var() {
        let env = EnvHandle::root();
        env.create_or_assign_var("x", Value::Integer(1), 1);
        assert!(matches!(env.get_var("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = EnvHandle::root();
        parent.create_or_assign_var("x", Value::Integer(1), 1);
        let child = parent.make_child();
        assert!(matches!(child.get_var("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn var_decl_in_child_shadows_without_touching_parent() {
        let parent = EnvHandle::root();
        parent.create_or_assign_var("x", Value::Integer(1), 1);
        let child = parent.make_child();
        child.create_or_assign_var("x", Value::Integer(2), 2);
        assert!(matches!(child.get_var("x"), Some(Value::Integer(2))));
        assert!(matches!(parent.get_var("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn assignment_reaches_through_parent_chain() {
        let parent = EnvHandle::root();
        parent.create_or_assign_var("x", Value::Integer(1), 1);
        let child = parent.make_child();
        assert!(child.assign_var("x", Value::Integer(9), 5));
        assert!(matches!(parent.get_var("x"), Some(Value::Integer(9))));
    }

    #[test]
    fn assigning_undeclared_name_fails() {
        let env = EnvHandle::root();
        assert!(!env.assign_var("missing", Value::Null, 1));
    }

    #[test]
    fn params_bind_in_declaration_order() {
        let env = EnvHandle::root();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            env.create_or_assign_var(name, Value::Integer(i as i32), 1);
        }
        let keys: Vec<_> = env.0.borrow().vars.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
