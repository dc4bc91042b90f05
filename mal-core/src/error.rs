// mal-core - Error types for the Mal evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Mal evaluation.
//!
//! Every error carries a trace: the ASTs it unwound through, appended
//! innermost-first as it propagates out of nested `eval` calls. `try*`
//! catches any error by binding [`Error::to_value`] to the catch symbol.
//!
//! # Examples
//!
//! ```
//! use mal_core::Error;
//!
//! let arity_err = Error::arity_named("my-fn", 2, 3);
//! assert!(arity_err.to_string().contains("my-fn"));
//! assert!(arity_err.to_string().contains("expected 2"));
//!
//! let type_err = Error::type_error("number", "string");
//! assert!(type_err.to_string().contains("expected number"));
//! ```

use mal_reader::{MalVal, ParseError, Symbol};
use std::fmt;

/// Result type for Mal evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// An evaluation error: a kind plus the trace of ASTs it unwound through.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    trace: Vec<MalVal>,
}

/// Kinds of errors that can occur during reading or evaluation.
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// Reader failure (unterminated string, unmatched closer, odd map length)
    Reader(String),
    /// Undefined symbol reference
    UndefinedSymbol(Symbol),
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Wrong number of arguments to a function or special form
    Arity {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Wrong type for an operation
    Type {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// `&` used anywhere other than the penultimate parameter position
    InvalidRestParameter(String),
    /// Invalid special form syntax
    InvalidSyntax { form: &'static str, message: String },
    /// Division by zero
    DivisionByZero,
    /// Index out of bounds
    IndexOutOfBounds { index: i64, length: usize },
    /// I/O error (file operations)
    Io {
        operation: &'static str,
        path: Option<String>,
        message: String,
    },
    /// User-thrown exception (via throw)
    Thrown(MalVal),
    /// Internal error - invariant violation
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Reader(msg) => {
                write!(f, "Reader error: {}", msg)
            }
            ErrorKind::UndefinedSymbol(sym) => {
                write!(f, "'{}' not found", sym)
            }
            ErrorKind::NotCallable(val) => {
                write!(f, "Cannot call value: {}", val)
            }
            ErrorKind::Arity {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            ErrorKind::Type {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            ErrorKind::InvalidRestParameter(msg) => {
                write!(f, "Invalid rest parameter: {}", msg)
            }
            ErrorKind::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            ErrorKind::DivisionByZero => {
                write!(f, "Division by zero")
            }
            ErrorKind::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for sequence of length {}",
                    index, length
                )
            }
            ErrorKind::Io {
                operation,
                path,
                message,
            } => {
                if let Some(path) = path {
                    write!(f, "{} '{}': {}", operation, path, message)
                } else {
                    write!(f, "{}: {}", operation, message)
                }
            }
            ErrorKind::Thrown(val) => {
                write!(f, "{}", val.display_string())
            }
            ErrorKind::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::reader(e.to_string())
    }
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            trace: Vec::new(),
        }
    }

    /// The error kind.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The ASTs this error unwound through, innermost first.
    #[must_use]
    pub fn trace(&self) -> &[MalVal] {
        &self.trace
    }

    /// Append an AST to the trace. Called once per `eval` frame as the
    /// error propagates outward; the trace is append-only.
    #[must_use]
    pub fn push_trace(mut self, ast: MalVal) -> Self {
        self.trace.push(ast);
        self
    }

    /// The term `catch*` binds for this error: the thrown term itself for
    /// `throw`, the message rendered as a String for host-level errors.
    #[must_use]
    pub fn to_value(&self) -> MalVal {
        match &self.kind {
            ErrorKind::Thrown(val) => val.clone(),
            _ => MalVal::string(self.to_string()),
        }
    }

    /// Create a reader error.
    pub fn reader(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Reader(message.into()))
    }

    /// Create an undefined symbol error.
    pub fn undefined_symbol(sym: Symbol) -> Self {
        Error::new(ErrorKind::UndefinedSymbol(sym))
    }

    /// Create a not-callable error.
    pub fn not_callable(val: &MalVal) -> Self {
        Error::new(ErrorKind::NotCallable(val.to_string()))
    }

    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::new(ErrorKind::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        })
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::new(ErrorKind::Arity {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        })
    }

    /// Create an arity error for minimum arity.
    pub fn arity_at_least(expected: usize, got: usize) -> Self {
        Error::new(ErrorKind::Arity {
            expected: AritySpec::AtLeast(expected),
            got,
            name: None,
        })
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::new(ErrorKind::Arity {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        })
    }

    /// Create an arity error for a range (min to max).
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::new(ErrorKind::Arity {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        })
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::new(ErrorKind::Type {
            expected,
            got,
            context: None,
        })
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::new(ErrorKind::Type {
            expected,
            got,
            context: Some(context.into()),
        })
    }

    /// Create an invalid rest parameter error.
    pub fn invalid_rest_parameter(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidRestParameter(message.into()))
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidSyntax {
            form,
            message: message.into(),
        })
    }

    /// Create a division by zero error.
    pub fn division_by_zero() -> Self {
        Error::new(ErrorKind::DivisionByZero)
    }

    /// Create an index out of bounds error.
    pub fn index_out_of_bounds(index: i64, length: usize) -> Self {
        Error::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Create an I/O error from a std::io::Error.
    pub fn io(operation: &'static str, path: Option<String>, error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io {
            operation,
            path,
            message: error.to_string(),
        })
    }

    /// Create a user-thrown error wrapping an arbitrary term.
    pub fn thrown(val: MalVal) -> Self {
        Error::new(ErrorKind::Thrown(val))
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::Internal(message.into()))
    }
}
