// mal-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mal_reader::{MalVal, Symbol};

use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references, enabling lexical
/// scoping. Each environment has its own bindings map and optionally a
/// parent environment for outer scope lookup. Cloning an `Env` clones the
/// handle, not the frame, so closures and child frames keep their parents
/// alive for as long as they are reachable.
///
/// # Examples
///
/// ```
/// use mal_core::Env;
/// use mal_reader::{MalVal, Symbol};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define(Symbol::new("x"), MalVal::int(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MalVal::int(42));
///
/// // Create a child environment that inherits parent bindings
/// let child = env.child();
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MalVal::int(42));
///
/// // Child can shadow parent bindings
/// child.define(Symbol::new("x"), MalVal::int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), MalVal::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), MalVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, MalVal>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment (not parent).
    pub fn define(&self, sym: Symbol, val: MalVal) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a symbol in this environment or parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    pub fn lookup(&self, sym: &Symbol) -> Result<MalVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Err(Error::undefined_symbol(sym.clone())),
            }
        }
    }

    /// Find the nearest environment (this one or an ancestor) that defines
    /// the symbol, or `None`.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    #[must_use]
    pub fn find(&self, sym: &Symbol) -> Option<Env> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if inner.bindings.contains_key(sym) {
                drop(inner);
                return Some(current);
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return None,
            }
        }
    }

    /// Check if a symbol is defined in this environment or parent chain.
    #[must_use]
    pub fn is_defined(&self, sym: &Symbol) -> bool {
        self.find(sym).is_some()
    }

    /// The root of this environment chain (the global frame). The `eval`
    /// form resumes evaluation here.
    /// Uses iterative traversal to avoid stack overflow on deep environments.
    #[must_use]
    pub fn root(&self) -> Env {
        let mut current = self.clone();
        loop {
            let parent = current.inner.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return current,
            }
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
