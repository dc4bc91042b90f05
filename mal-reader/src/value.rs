// mal-reader - Value types for Mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Mal.
//!
//! `MalVal` is the central enum representing all Mal terms. The reader
//! produces `MalVal` trees, the evaluator rewrites them, and the printer
//! renders them back to text.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// A Mal term.
///
/// Terms are immutable after construction, with two exceptions: the contents
/// of an [`MalAtom`] cell, and the `is_macro` flag which is fixed when
/// `defmacro!` re-binds a function. Collections carry optional metadata that
/// is ignored by equality and printing.
#[derive(Clone)]
pub enum MalVal {
    /// The absent value
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// The single numeric type: a 64-bit signed integer
    Int(i64),
    /// Immutable string
    String(Rc<str>),
    /// Self-evaluating identifier, printed as `:name`
    Keyword(Keyword),
    /// Interned identifier
    Symbol(Symbol),
    /// Call form, printed as `(…)` (with optional metadata)
    List(Vector<MalVal>, Option<Rc<MalVal>>),
    /// Data form, printed as `[…]` (with optional metadata)
    Vector(Vector<MalVal>, Option<Rc<MalVal>>),
    /// Mapping with String/Keyword keys (with optional metadata)
    Map(OrdMap<MalVal, MalVal>, Option<Rc<MalVal>>),
    /// User-defined function (closure), possibly marked as a macro
    Fn(MalFn),
    /// Native (Rust) function
    NativeFn(MalNativeFn),
    /// Mutable single-slot cell
    Atom(MalAtom),
}

// ============================================================================
// Function Types
// ============================================================================

/// A user-defined function (closure).
///
/// Stores the parameter symbols, the unevaluated body term and a type-erased
/// reference to the environment captured at construction. The actual
/// environment type is defined in mal-core; the erasure breaks what would
/// otherwise be a circular crate dependency.
#[derive(Clone)]
pub struct MalFn {
    /// Positional parameter names (excluding the rest parameter)
    pub params: Vec<Symbol>,
    /// Rest parameter name bound after `&`, if any
    pub rest_param: Option<Symbol>,
    /// The unevaluated body term
    pub body: Rc<MalVal>,
    /// Captured environment (type-erased to avoid circular dependency)
    pub env: Rc<dyn Any>,
    /// True once `defmacro!` has marked this function as a macro
    pub is_macro: bool,
    /// Attached metadata, if any
    pub meta: Option<Rc<MalVal>>,
}

impl MalFn {
    /// Create a new function closing over the given environment.
    pub fn new(
        params: Vec<Symbol>,
        rest_param: Option<Symbol>,
        body: MalVal,
        env: Rc<dyn Any>,
    ) -> Self {
        MalFn {
            params,
            rest_param,
            body: Rc::new(body),
            env,
            is_macro: false,
            meta: None,
        }
    }

    /// A copy of this function with the macro flag set.
    #[must_use]
    pub fn as_macro(&self) -> Self {
        let mut f = self.clone();
        f.is_macro = true;
        f
    }

    /// A copy of this function with the given metadata attached.
    #[must_use]
    pub fn with_meta(&self, meta: MalVal) -> Self {
        let mut f = self.clone();
        f.meta = Some(Rc::new(meta));
        f
    }

    /// Check if this function can accept the given number of arguments.
    #[inline]
    #[must_use]
    pub fn matches(&self, arg_count: usize) -> bool {
        if self.rest_param.is_some() {
            arg_count >= self.params.len()
        } else {
            arg_count == self.params.len()
        }
    }
}

impl fmt::Debug for MalFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_macro {
            write!(f, "#<macro>")
        } else {
            write!(f, "#<function>")
        }
    }
}

impl PartialEq for MalFn {
    fn eq(&self, _other: &Self) -> bool {
        false // Functions are never equal
    }
}

/// A native (Rust) function.
#[derive(Clone)]
pub struct MalNativeFn {
    /// Function name for display and error messages
    pub name: Rc<str>,
    /// The actual function (type-erased; the concrete signature lives in mal-core)
    func: Rc<dyn Any>,
}

impl MalNativeFn {
    /// Create a new native function with a type-erased function.
    pub fn new(name: impl Into<Rc<str>>, func: Rc<dyn Any>) -> Self {
        MalNativeFn {
            name: name.into(),
            func,
        }
    }

    /// Get the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the inner function reference.
    #[must_use]
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

impl fmt::Debug for MalNativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native {}>", self.name)
    }
}

impl PartialEq for MalNativeFn {
    fn eq(&self, other: &Self) -> bool {
        // Use Rc pointer comparison for identity equality
        Rc::ptr_eq(&self.func, &other.func)
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable single-slot cell.
///
/// Atoms are the only source of runtime mutation outside environments.
#[derive(Clone)]
pub struct MalAtom {
    value: Rc<RefCell<MalVal>>,
}

impl MalAtom {
    /// Create a new atom with an initial value.
    pub fn new(value: MalVal) -> Self {
        MalAtom {
            value: Rc::new(RefCell::new(value)),
        }
    }

    /// Get the current value (deref).
    #[inline]
    #[must_use]
    pub fn deref(&self) -> MalVal {
        self.value.borrow().clone()
    }

    /// Replace the value, returning the new value.
    pub fn reset(&self, new_val: MalVal) -> MalVal {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }
}

impl fmt::Debug for MalAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {:?})", self.value.borrow())
    }
}

impl PartialEq for MalAtom {
    fn eq(&self, other: &Self) -> bool {
        // Atoms are equal if they point to the same value cell
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl Eq for MalAtom {}

// ============================================================================
// Constructors and Accessors
// ============================================================================

impl MalVal {
    /// Create a nil value
    #[inline]
    #[must_use]
    pub fn nil() -> Self {
        MalVal::Nil
    }

    /// Create a boolean value
    #[inline]
    #[must_use]
    pub fn bool(b: bool) -> Self {
        MalVal::Bool(b)
    }

    /// Create an integer value
    #[inline]
    #[must_use]
    pub fn int(n: i64) -> Self {
        MalVal::Int(n)
    }

    /// Create a string value
    #[must_use]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        MalVal::String(s.into())
    }

    /// Create a symbol value
    #[must_use]
    pub fn symbol(sym: Symbol) -> Self {
        MalVal::Symbol(sym)
    }

    /// Create a keyword value
    #[must_use]
    pub fn keyword(kw: Keyword) -> Self {
        MalVal::Keyword(kw)
    }

    /// Create an empty list
    #[inline]
    #[must_use]
    pub fn empty_list() -> Self {
        MalVal::List(Vector::new(), None)
    }

    /// Create a list from elements
    #[must_use]
    pub fn list(elements: Vec<MalVal>) -> Self {
        MalVal::List(elements.into_iter().collect(), None)
    }

    /// Create an empty vector
    #[inline]
    #[must_use]
    pub fn empty_vector() -> Self {
        MalVal::Vector(Vector::new(), None)
    }

    /// Create a vector from elements
    #[must_use]
    pub fn vector(elements: Vec<MalVal>) -> Self {
        MalVal::Vector(elements.into_iter().collect(), None)
    }

    /// Create an empty map
    #[inline]
    #[must_use]
    pub fn empty_map() -> Self {
        MalVal::Map(OrdMap::new(), None)
    }

    /// Create a map from key-value pairs; duplicate keys keep the last value
    #[must_use]
    pub fn map(pairs: Vec<(MalVal, MalVal)>) -> Self {
        MalVal::Map(pairs.into_iter().collect(), None)
    }

    /// Create an atom value
    #[inline]
    pub fn atom(value: MalVal) -> Self {
        MalVal::Atom(MalAtom::new(value))
    }

    /// Check if this value is nil
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, MalVal::Nil)
    }

    /// Check if this value is truthy (not nil and not false)
    #[inline]
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, MalVal::Nil | MalVal::Bool(false))
    }

    /// Sequential elements, if this is a List or Vector.
    #[must_use]
    pub fn as_seq(&self) -> Option<&Vector<MalVal>> {
        match self {
            MalVal::List(items, _) | MalVal::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    /// A copy of this value with the given metadata attached.
    /// Returns `None` for value kinds that cannot carry metadata.
    #[must_use]
    pub fn with_meta(&self, meta: MalVal) -> Option<MalVal> {
        match self {
            MalVal::List(items, _) => Some(MalVal::List(items.clone(), Some(Rc::new(meta)))),
            MalVal::Vector(items, _) => Some(MalVal::Vector(items.clone(), Some(Rc::new(meta)))),
            MalVal::Map(map, _) => Some(MalVal::Map(map.clone(), Some(Rc::new(meta)))),
            MalVal::Fn(f) => Some(MalVal::Fn(f.with_meta(meta))),
            _ => None,
        }
    }

    /// The attached metadata, or nil if none.
    #[must_use]
    pub fn meta(&self) -> MalVal {
        let meta = match self {
            MalVal::List(_, meta) | MalVal::Vector(_, meta) | MalVal::Map(_, meta) => meta,
            MalVal::Fn(f) => &f.meta,
            _ => &None,
        };
        meta.as_ref().map(|m| (**m).clone()).unwrap_or(MalVal::Nil)
    }

    /// Get the type name as a string
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            MalVal::Nil => "nil",
            MalVal::Bool(_) => "bool",
            MalVal::Int(_) => "number",
            MalVal::String(_) => "string",
            MalVal::Keyword(_) => "keyword",
            MalVal::Symbol(_) => "symbol",
            MalVal::List(_, _) => "list",
            MalVal::Vector(_, _) => "vector",
            MalVal::Map(_, _) => "map",
            MalVal::Fn(f) if f.is_macro => "macro",
            MalVal::Fn(_) => "fn",
            MalVal::NativeFn(_) => "fn",
            MalVal::Atom(_) => "atom",
        }
    }
}

// ============================================================================
// Equality and Ordering
// ============================================================================

impl PartialEq for MalVal {
    fn eq(&self, other: &Self) -> bool {
        // Note: Metadata is intentionally ignored in equality comparisons.
        match (self, other) {
            (MalVal::Nil, MalVal::Nil) => true,
            (MalVal::Bool(a), MalVal::Bool(b)) => a == b,
            (MalVal::Int(a), MalVal::Int(b)) => a == b,
            (MalVal::String(a), MalVal::String(b)) => a == b,
            (MalVal::Keyword(a), MalVal::Keyword(b)) => a == b,
            (MalVal::Symbol(a), MalVal::Symbol(b)) => a == b,
            (MalVal::List(a, _), MalVal::List(b, _)) => a == b,
            (MalVal::Vector(a, _), MalVal::Vector(b, _)) => a == b,
            // Cross-variant sequential equality: (= '(1 2) [1 2]) => true
            (MalVal::List(a, _), MalVal::Vector(b, _)) => a == b,
            (MalVal::Vector(a, _), MalVal::List(b, _)) => a == b,
            (MalVal::Map(a, _), MalVal::Map(b, _)) => a == b,
            (MalVal::Fn(a), MalVal::Fn(b)) => a == b,
            (MalVal::NativeFn(a), MalVal::NativeFn(b)) => a == b,
            (MalVal::Atom(a), MalVal::Atom(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MalVal {}

impl PartialOrd for MalVal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MalVal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Type rank for heterogeneous comparison. List and Vector share a
        // rank so that ordering stays consistent with cross-variant equality.
        fn type_order(v: &MalVal) -> u8 {
            match v {
                MalVal::Nil => 0,
                MalVal::Bool(_) => 1,
                MalVal::Int(_) => 2,
                MalVal::String(_) => 3,
                MalVal::Keyword(_) => 4,
                MalVal::Symbol(_) => 5,
                MalVal::List(_, _) | MalVal::Vector(_, _) => 6,
                MalVal::Map(_, _) => 7,
                MalVal::Fn(_) => 8,
                MalVal::NativeFn(_) => 9,
                MalVal::Atom(_) => 10,
            }
        }

        match (self, other) {
            (MalVal::Nil, MalVal::Nil) => Ordering::Equal,
            (MalVal::Bool(a), MalVal::Bool(b)) => a.cmp(b),
            (MalVal::Int(a), MalVal::Int(b)) => a.cmp(b),
            (MalVal::String(a), MalVal::String(b)) => a.cmp(b),
            (MalVal::Keyword(a), MalVal::Keyword(b)) => a.cmp(b),
            (MalVal::Symbol(a), MalVal::Symbol(b)) => a.cmp(b),
            (
                MalVal::List(a, _) | MalVal::Vector(a, _),
                MalVal::List(b, _) | MalVal::Vector(b, _),
            ) => a.cmp(b),
            (MalVal::Map(a, _), MalVal::Map(b, _)) => a.cmp(b),
            // Opaque values order by pointer address for a stable total order
            (MalVal::Fn(a), MalVal::Fn(b)) => {
                (Rc::as_ptr(&a.body) as usize).cmp(&(Rc::as_ptr(&b.body) as usize))
            }
            (MalVal::NativeFn(a), MalVal::NativeFn(b)) => {
                (Rc::as_ptr(a.func()) as *const () as usize)
                    .cmp(&(Rc::as_ptr(b.func()) as *const () as usize))
            }
            (MalVal::Atom(a), MalVal::Atom(b)) => {
                (Rc::as_ptr(&a.value) as usize).cmp(&(Rc::as_ptr(&b.value) as usize))
            }
            (a, b) => type_order(a).cmp(&type_order(b)),
        }
    }
}

// ============================================================================
// Printing
// ============================================================================

impl MalVal {
    fn fmt_impl(&self, f: &mut fmt::Formatter<'_>, readable: bool) -> fmt::Result {
        match self {
            MalVal::Nil => write!(f, "nil"),
            MalVal::Bool(b) => write!(f, "{}", b),
            MalVal::Int(n) => write!(f, "{}", n),
            MalVal::String(s) => {
                if readable {
                    write!(f, "\"{}\"", escape_string(s))
                } else {
                    write!(f, "{}", s)
                }
            }
            MalVal::Keyword(kw) => write!(f, "{}", kw),
            MalVal::Symbol(sym) => write!(f, "{}", sym),
            MalVal::List(items, _) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    item.fmt_impl(f, readable)?;
                }
                write!(f, ")")
            }
            MalVal::Vector(items, _) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    item.fmt_impl(f, readable)?;
                }
                write!(f, "]")
            }
            MalVal::Map(map, _) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    k.fmt_impl(f, readable)?;
                    write!(f, " ")?;
                    v.fmt_impl(f, readable)?;
                }
                write!(f, "}}")
            }
            MalVal::Fn(func) if func.is_macro => write!(f, "#<macro>"),
            MalVal::Fn(_) => write!(f, "#<function>"),
            MalVal::NativeFn(_) => write!(f, "#<native>"),
            MalVal::Atom(a) => {
                write!(f, "(atom ")?;
                a.deref().fmt_impl(f, readable)?;
                write!(f, ")")
            }
        }
    }

    /// Render in display mode: string contents raw, recursively.
    /// `Display` (and `{}` formatting) is the readable mode, whose output
    /// re-reads to an equal term.
    #[must_use]
    pub fn display_string(&self) -> String {
        struct DisplayMode<'a>(&'a MalVal);
        impl fmt::Display for DisplayMode<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_impl(f, false)
            }
        }
        format!("{}", DisplayMode(self))
    }
}

impl fmt::Display for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_impl(f, true)
    }
}

impl fmt::Debug for MalVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

// ============================================================================
// Tests
// ============================================================================
