// mal-reader - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are the identifiers of Mal source code.
//!
//! # Interning
//!
//! Symbols are interned using a global string interner, meaning that two
//! symbols with the same name share the same underlying storage. This
//! provides several benefits:
//!
//! - **O(1) equality**: Comparing symbols is a pointer comparison, not string comparison
//! - **O(1) hashing**: Hash is computed from the pointer address
//! - **Memory efficiency**: Identical symbols share storage
//!
//! Interning is what lets the evaluator dispatch special forms on symbol
//! identity rather than on name equality.
//!
//! # Memory Behaviour
//!
//! **Important**: Interned symbols are never deallocated. The global interner
//! maintains strong references (`Arc`) to all symbols created during the
//! program's lifetime, so memory usage grows monotonically with unique
//! symbols. This is intentional: symbols are reused frequently and typical
//! programs use a bounded set of them.
//!
//! # Thread Safety
//!
//! The interner is protected by a `Mutex`, making symbol creation
//! thread-safe. Symbol lookup and comparison are lock-free after creation.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// An interned identifier.
///
/// Two symbols with the same name share the same underlying storage.
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<str>,
}

/// Global symbol interner
static SYMBOL_INTERNER: OnceLock<Mutex<SymbolInterner>> = OnceLock::new();

struct SymbolInterner {
    /// Map from name to interned storage
    symbols: HashMap<String, Arc<str>>,
}

impl SymbolInterner {
    fn new() -> Self {
        SymbolInterner {
            symbols: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.symbols.get(name) {
            Arc::clone(existing)
        } else {
            let interned: Arc<str> = Arc::from(name);
            self.symbols.insert(name.to_string(), Arc::clone(&interned));
            interned
        }
    }
}

fn get_interner() -> &'static Mutex<SymbolInterner> {
    SYMBOL_INTERNER.get_or_init(|| Mutex::new(SymbolInterner::new()))
}

impl Symbol {
    /// Create (or look up) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        let inner = get_interner()
            .lock()
            .expect(
                "Symbol interner mutex poisoned: another thread panicked while holding the lock",
            )
            .intern(name);
        Symbol { inner }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.as_ref().cmp(other.inner.as_ref())
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned symbols
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
