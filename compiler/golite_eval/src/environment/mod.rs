//! Environment for variable scoping in the interpreter.
//!
//! Package-level variables live in one global scope. Each function call
//! opens a frame holding its own stack of block scopes; lookups walk the
//! current frame innermost-first and then fall back to the globals, so a
//! callee never sees its caller's locals.
//!
//! `define` always binds in the innermost scope. Shadowing therefore never
//! touches an outer binding, and popping the scope restores it.

use golite_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

/// A single block scope.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    #[inline]
    pub fn lookup_mut(&mut self, name: Name) -> Option<&mut Value> {
        self.bindings.get_mut(&name)
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }
}

/// Block scopes of one function activation.
#[derive(Debug)]
struct Frame {
    scopes: Vec<Scope>,
}

/// Scope chain: globals plus the stack of call frames.
#[derive(Debug, Default)]
pub struct Environment {
    globals: Scope,
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a function body: a fresh frame with one scope for parameters.
    pub fn push_frame(&mut self) {
        self.frames.push(Frame {
            scopes: vec![Scope::new()],
        });
    }

    /// Leave a function body.
    pub fn pop_frame(&mut self) {
        debug_assert!(!self.frames.is_empty(), "pop_frame on empty environment");
        self.frames.pop();
    }

    /// Enter a block.
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.push(Scope::new());
        }
    }

    /// Leave a block.
    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            debug_assert!(frame.scopes.len() > 1, "pop_scope would drop the frame scope");
            frame.scopes.pop();
        }
    }

    fn innermost(&mut self) -> &mut Scope {
        match self.frames.last_mut().and_then(|frame| frame.scopes.last_mut()) {
            Some(scope) => scope,
            None => &mut self.globals,
        }
    }

    /// Bind `name` in the innermost scope (the globals outside any call).
    ///
    /// The blank identifier binds nothing.
    pub fn define(&mut self, name: Name, value: Value) {
        if name.is_blank() {
            return;
        }
        self.innermost().define(name, value);
    }

    /// Bind `name` at package level.
    pub fn define_global(&mut self, name: Name, value: Value) {
        if name.is_blank() {
            return;
        }
        self.globals.define(name, value);
    }

    /// Resolve `name`, innermost scope first.
    pub fn lookup(&self, name: Name) -> Option<&Value> {
        let local = self
            .frames
            .last()
            .and_then(|frame| frame.scopes.iter().rev().find_map(|scope| scope.lookup(name)));
        local.or_else(|| self.globals.lookup(name))
    }

    /// Resolve `name` for writing, innermost scope first.
    pub fn lookup_mut(&mut self, name: Name) -> Option<&mut Value> {
        if let Some(frame) = self.frames.last_mut() {
            if let Some(scope) = frame.scopes.iter_mut().rev().find(|scope| scope.contains(name)) {
                return scope.lookup_mut(name);
            }
        }
        self.globals.lookup_mut(name)
    }
}

#[cfg(test)]
mod tests;
