// mal-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for Mal integration tests.
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

// Re-export common types for convenience
pub use mal_core::builtins::register_builtins;
pub use mal_core::env::Env;
pub use mal_core::eval::eval;
pub use mal_core::init_stdlib;
#[allow(unused_imports)]
pub use mal_reader::{Keyword, MalVal, Parser, Symbol};

/// Evaluate a Mal expression string in a fresh environment with builtins
/// (but without the bootstrap stdlib).
#[must_use]
#[allow(dead_code)]
pub fn eval_str(s: &str) -> Result<MalVal, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a Mal expression string in the given environment.
#[must_use]
#[allow(dead_code)]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MalVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    match parser.parse().map_err(|e| e.to_string())? {
        Some(expr) => eval(&expr, env).map_err(|e| e.to_string()),
        None => Ok(MalVal::Nil),
    }
}

/// Evaluate multiple Mal expressions in order, returning the last result.
#[must_use]
#[allow(dead_code)]
pub fn eval_all(s: &str, env: &Env) -> Result<MalVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    let mut result = MalVal::Nil;

    while let Some(expr) = parser.parse().map_err(|e| e.to_string())? {
        result = eval(&expr, env).map_err(|e| e.to_string())?;
    }

    Ok(result)
}

/// Create a new environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Create a new environment with builtins and the bootstrap stdlib
/// (`not`, `load-file`, `cond`, `or`).
///
/// # Panics
///
/// Panics if the bootstrap forms fail to load (should never happen).
#[must_use]
#[allow(dead_code)]
pub fn new_env_with_stdlib() -> Env {
    let env = new_env();
    init_stdlib(&env).expect("Failed to load bootstrap stdlib");
    env
}

/// Assert that evaluating `input` produces the expected value.
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` in the given environment produces the
/// expected value.
#[macro_export]
macro_rules! assert_eval_with_env {
    ($input:expr, $expected:expr, $env:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}
