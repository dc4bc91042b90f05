// mal-reader - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers printed with a leading colon.
//!
//! They are interned the same way symbols are (see [`crate::symbol`] for the
//! interning discipline): equality and hashing are pointer operations, and
//! interned keywords are never deallocated.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// A self-evaluating identifier, printed as `:name`.
#[derive(Clone)]
pub struct Keyword {
    inner: Arc<str>,
}

/// Global keyword interner
static KEYWORD_INTERNER: OnceLock<Mutex<KeywordInterner>> = OnceLock::new();

struct KeywordInterner {
    keywords: HashMap<String, Arc<str>>,
}

impl KeywordInterner {
    fn new() -> Self {
        KeywordInterner {
            keywords: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.keywords.get(name) {
            Arc::clone(existing)
        } else {
            let interned: Arc<str> = Arc::from(name);
            self.keywords
                .insert(name.to_string(), Arc::clone(&interned));
            interned
        }
    }
}

fn get_interner() -> &'static Mutex<KeywordInterner> {
    KEYWORD_INTERNER.get_or_init(|| Mutex::new(KeywordInterner::new()))
}

impl Keyword {
    /// Create (or look up) the keyword with the given name.
    /// The name does not include the leading colon.
    pub fn new(name: &str) -> Self {
        let inner = get_interner()
            .lock()
            .expect(
                "Keyword interner mutex poisoned: another thread panicked while holding the lock",
            )
            .intern(name);
        Keyword { inner }
    }

    /// Parse a keyword from a string like ":foo". The leading colon is optional.
    pub fn parse(s: &str) -> Self {
        Keyword::new(s.strip_prefix(':').unwrap_or(s))
    }

    /// Get the name (without the colon).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.inner)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl PartialOrd for Keyword {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.as_ref().cmp(other.inner.as_ref())
    }
}

impl Hash for Keyword {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned keywords
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_keyword() {
        let kw = Keyword::new("foo");
        assert_eq!(kw.name(), "foo");
        assert_eq!(format!("{}", kw), ":foo");
    }

    #[test]
    fn test_parse_with_colon() {
        let kw = Keyword::parse(":foo");
        assert_eq!(kw.name(), "foo");
    }

    #[test]
    fn test_parse_without_colon() {
        let kw = Keyword::parse("foo");
        assert_eq!(kw.name(), "foo");
    }

    #[test]
    fn test_interning() {
        let kw1 = Keyword::new("foo");
        let kw2 = Keyword::new("foo");
        assert_eq!(kw1, kw2);
        assert!(Arc::ptr_eq(&kw1.inner, &kw2.inner));
    }

    #[test]
    fn test_equality() {
        let kw1 = Keyword::new("foo");
        let kw2 = Keyword::new("foo");
        let kw3 = Keyword::new("bar");

        assert_eq!(kw1, kw2);
        assert_ne!(kw1, kw3);
    }

    #[test]
    fn test_keyword_is_not_symbol() {
        use crate::symbol::Symbol;
        // Same name, distinct worlds: keywords and symbols never compare equal
        // at the value level (checked in value.rs), and their displays differ.
        let kw = Keyword::new("x");
        let sym = Symbol::new("x");
        assert_eq!(format!("{}", kw), ":x");
        assert_eq!(format!("{}", sym), "x");
    }
}
