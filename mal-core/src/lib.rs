// mal-core - Runtime and evaluator for the Mal programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-core
//!
//! Runtime and evaluator for the Mal programming language.
//! Provides a tail-call-optimized tree-walking interpreter for `MalVal`
//! expressions.
//!
//! # Quick Start
//!
//! ```
//! use mal_core::{Env, eval, register_builtins, init_stdlib};
//! use mal_reader::Parser;
//!
//! // Set up the root environment with builtins and the bootstrap forms
//! let env = Env::new();
//! register_builtins(&env);
//! init_stdlib(&env).unwrap();
//!
//! // Parse and evaluate an expression
//! let expr = Parser::parse_str("(+ 1 2 3)").unwrap().unwrap();
//! let result = eval(&expr, &env).unwrap();
//!
//! assert_eq!(result.to_string(), "6");
//! ```
//!
//! # Core Components
//!
//! - [`Env`] - Lexical environment for variable bindings
//! - [`eval`] - Evaluate a `MalVal` expression
//! - [`register_builtins`] - Register native functions
//! - [`init_stdlib`] - Evaluate the bootstrap forms (`not`, `load-file`,
//!   `cond`, `or`)

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::register_builtins;
pub use env::Env;
pub use error::{Error, ErrorKind, Result};
pub use eval::{apply, eval, macroexpand, make_native_fn, quasiquote};

// Re-export reader types for convenience
pub use mal_reader::{Keyword, MalVal, Symbol};

/// Embedded bootstrap source (self-hosted definitions evaluated at startup).
const CORE_STDLIB: &str = include_str!("../../mal-std/core.mal");

/// Initialise the standard library by evaluating the embedded bootstrap
/// forms, defining `not`, `load-file`, `cond` and `or`. Call this after
/// [`register_builtins`].
///
/// # Examples
///
/// ```
/// use mal_core::{Env, eval, register_builtins, init_stdlib};
/// use mal_reader::Parser;
///
/// let env = Env::new();
/// register_builtins(&env);
/// init_stdlib(&env).unwrap();
///
/// let expr = Parser::parse_str("(not nil)").unwrap().unwrap();
/// assert_eq!(eval(&expr, &env).unwrap().to_string(), "true");
/// ```
pub fn init_stdlib(env: &Env) -> Result<()> {
    let mut parser = mal_reader::Parser::new(CORE_STDLIB)?;

    while let Some(expr) = parser.parse()? {
        eval::eval(&expr, env)?;
    }

    Ok(())
}
