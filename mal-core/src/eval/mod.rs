// mal-core - Trampolined evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Mal expressions.
//!
//! The evaluator is a trampoline: instead of recursing into tail positions,
//! the main loop rebinds `ast` and `env` and continues, so tail calls of
//! unbounded depth (`let*` bodies, `do` tails, `if` branches, user function
//! application, `eval`, `quasiquote` and `macroexpand`) consume no host
//! stack. Non-tail positions (`def!` values, function arguments, `let*`
//! binding expressions) recurse normally.

// Submodules
pub mod apply;
pub mod exceptions;
pub mod quasiquote;

// Re-exports from submodules
pub use apply::{NativeFnImpl, apply, make_native_fn};
pub use quasiquote::quasiquote;

use std::rc::Rc;

use mal_reader::{MalFn, MalVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};

use apply::{apply_fn, apply_native, bind_params};
use exceptions::eval_try;

/// Evaluate a Mal expression in the given environment.
///
/// This is the main entry point for interpreting Mal code. It handles all
/// expression types including special forms, macro expansion, function
/// application and symbol resolution.
///
/// # Examples
///
/// ```
/// use mal_core::{Env, eval, register_builtins};
/// use mal_reader::{MalVal, Parser};
///
/// let env = Env::new();
/// register_builtins(&env);
///
/// let expr = Parser::parse_str("(+ 1 (* 2 3))").unwrap().unwrap();
/// assert_eq!(eval(&expr, &env).unwrap(), MalVal::int(7));
/// ```
///
/// # Errors
///
/// Returns an error if a symbol cannot be resolved, a non-callable value is
/// applied, arities mismatch, or `throw` unwinds uncaught. The entry AST is
/// appended to the error's trace as it propagates out of this call.
#[must_use = "eval returns a value that should be used"]
pub fn eval(expr: &MalVal, env: &Env) -> Result<MalVal> {
    eval_inner(expr, env).map_err(|e| e.push_trace(expr.clone()))
}

fn eval_inner(expr: &MalVal, env: &Env) -> Result<MalVal> {
    let mut ast = expr.clone();
    let mut env = env.clone();

    loop {
        if !matches!(ast, MalVal::List(_, _)) {
            return eval_ast(&ast, &env);
        }

        // Expand macro calls until the head is no longer a macro
        ast = macroexpand(ast, &env)?;

        let items: Vec<MalVal> = match &ast {
            MalVal::List(items, _) => items.iter().cloned().collect(),
            _ => return eval_ast(&ast, &env),
        };

        if items.is_empty() {
            return Ok(MalVal::Nil);
        }

        // Special forms dispatch on the head symbol's interned name
        if let MalVal::Symbol(sym) = &items[0] {
            match sym.name() {
                "def!" => return eval_def(&items[1..], &env),
                "defmacro!" => return eval_defmacro(&items[1..], &env),
                "let*" => {
                    let (body, let_env) = eval_let(&items[1..], &env)?;
                    ast = body;
                    env = let_env;
                    continue;
                }
                "do" => {
                    if items.len() < 2 {
                        return Err(Error::syntax("do", "requires at least 1 argument"));
                    }
                    for form in &items[1..items.len() - 1] {
                        eval(form, &env)?;
                    }
                    ast = items[items.len() - 1].clone();
                    continue;
                }
                "if" => {
                    if items.len() < 3 || items.len() > 4 {
                        return Err(Error::syntax("if", "requires 2 or 3 arguments"));
                    }
                    let test = eval(&items[1], &env)?;
                    if test.is_truthy() {
                        ast = items[2].clone();
                    } else if items.len() == 4 {
                        ast = items[3].clone();
                    } else {
                        return Ok(MalVal::Nil);
                    }
                    continue;
                }
                "fn*" => return eval_fn(&items[1..], &env),
                "quote" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("quote", "requires exactly 1 argument"));
                    }
                    return Ok(items[1].clone());
                }
                "quasiquote" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("quasiquote", "requires exactly 1 argument"));
                    }
                    ast = quasiquote(&items[1]);
                    continue;
                }
                "macroexpand" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("macroexpand", "requires exactly 1 argument"));
                    }
                    ast = macroexpand(items[1].clone(), &env)?;
                    continue;
                }
                "try*" => return eval_try(&items[1..], &env),
                "eval" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("eval", "requires exactly 1 argument"));
                    }
                    // Resume with the evaluated form in the global frame
                    ast = eval(&items[1], &env)?;
                    env = env.root();
                    continue;
                }
                _ => {}
            }
        }

        // General application: evaluate head and arguments, then apply
        let mut evaluated = Vec::with_capacity(items.len());
        for item in &items {
            evaluated.push(eval(item, &env)?);
        }
        let args = &evaluated[1..];
        match &evaluated[0] {
            MalVal::NativeFn(f) => return apply_native(f, args),
            MalVal::Fn(f) if !f.is_macro => {
                let fn_env = bind_params(f, args)?;
                ast = (*f.body).clone();
                env = fn_env;
                continue;
            }
            // A macro reached as a runtime value is not invocable
            other => return Err(Error::not_callable(other)),
        }
    }
}

/// Evaluate the non-apply cases: symbols resolve in the environment,
/// collections evaluate element-wise, everything else is self-evaluating.
pub fn eval_ast(ast: &MalVal, env: &Env) -> Result<MalVal> {
    match ast {
        MalVal::Symbol(sym) => env.lookup(sym),
        MalVal::List(items, _) => {
            let evaluated: Result<Vec<_>> = items.iter().map(|e| eval(e, env)).collect();
            Ok(MalVal::list(evaluated?))
        }
        MalVal::Vector(items, _) => {
            let evaluated: Result<Vec<_>> = items.iter().map(|e| eval(e, env)).collect();
            Ok(MalVal::vector(evaluated?))
        }
        MalVal::Map(map, _) => {
            let mut result = Vec::with_capacity(map.len());
            for (k, v) in map.iter() {
                result.push((k.clone(), eval(v, env)?));
            }
            Ok(MalVal::map(result))
        }
        other => Ok(other.clone()),
    }
}

// ============================================================================
// Macro Expansion
// ============================================================================

/// Expand `ast` while it is a call to a macro, invoking the macro on the
/// unevaluated arguments each round. This is a fixed point: expanding an
/// already-expanded form returns it unchanged.
pub fn macroexpand(mut ast: MalVal, env: &Env) -> Result<MalVal> {
    while let Some(makro) = as_macro_call(&ast, env) {
        let args: Vec<MalVal> = match &ast {
            MalVal::List(items, _) => items.iter().skip(1).cloned().collect(),
            _ => unreachable!("macro call is always a list"),
        };
        ast = apply_fn(&makro, &args)?;
    }
    Ok(ast)
}

/// The macro a non-empty list form invokes, if its head symbol resolves to
/// a function marked `is_macro`.
fn as_macro_call(ast: &MalVal, env: &Env) -> Option<MalFn> {
    if let MalVal::List(items, _) = ast
        && let Some(MalVal::Symbol(sym)) = items.front()
        && let Ok(MalVal::Fn(f)) = env.lookup(sym)
        && f.is_macro
    {
        Some(f)
    } else {
        None
    }
}

// ============================================================================
// Non-tail Special Forms
// ============================================================================

/// (def! name value) - evaluate value and bind it in the current environment
fn eval_def(args: &[MalVal], env: &Env) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::syntax("def!", "requires a symbol and a value"));
    }
    let sym = match &args[0] {
        MalVal::Symbol(s) => s.clone(),
        other => return Err(Error::type_error_in("def!", "symbol", other.type_name())),
    };
    let val = eval(&args[1], env)?;
    env.define(sym, val.clone());
    Ok(val)
}

/// (defmacro! name value) - like def!, but the value must evaluate to a
/// function, which is bound with its macro flag set
fn eval_defmacro(args: &[MalVal], env: &Env) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::syntax("defmacro!", "requires a symbol and a function"));
    }
    let sym = match &args[0] {
        MalVal::Symbol(s) => s.clone(),
        other => {
            return Err(Error::type_error_in(
                "defmacro!",
                "symbol",
                other.type_name(),
            ));
        }
    };
    let makro = match eval(&args[1], env)? {
        MalVal::Fn(f) => MalVal::Fn(f.as_macro()),
        other => return Err(Error::type_error_in("defmacro!", "fn", other.type_name())),
    };
    env.define(sym, makro.clone());
    Ok(makro)
}

/// (let* (name expr …) body) - sequential bindings in a child environment.
/// Returns the body and the child environment for the trampoline.
fn eval_let(args: &[MalVal], env: &Env) -> Result<(MalVal, Env)> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "let*",
            "requires a binding sequence and a body",
        ));
    }
    let bindings: Vec<MalVal> = match args[0].as_seq() {
        Some(items) => items.iter().cloned().collect(),
        None => {
            return Err(Error::syntax(
                "let*",
                "first argument must be a sequence of bindings",
            ));
        }
    };
    if !bindings.len().is_multiple_of(2) {
        return Err(Error::syntax(
            "let*",
            "binding sequence must have an even number of forms",
        ));
    }

    // Each pair evaluates in the child environment, so later bindings see
    // earlier ones
    let let_env = env.child();
    for pair in bindings.chunks(2) {
        let sym = match &pair[0] {
            MalVal::Symbol(s) => s.clone(),
            other => return Err(Error::type_error_in("let*", "symbol", other.type_name())),
        };
        let val = eval(&pair[1], &let_env)?;
        let_env.define(sym, val);
    }

    Ok((args[1].clone(), let_env))
}

/// (fn* (params…) body) - construct a closure over the current environment
fn eval_fn(args: &[MalVal], env: &Env) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "fn*",
            "requires a parameter sequence and a body",
        ));
    }
    let (params, rest_param) = parse_params(&args[0])?;
    Ok(MalVal::Fn(MalFn::new(
        params,
        rest_param,
        args[1].clone(),
        Rc::new(env.clone()),
    )))
}

/// Validate a parameter-binding sequence: all symbols, with `&` allowed only
/// at the penultimate position, binding the following symbol to the rest of
/// the arguments.
fn parse_params(form: &MalVal) -> Result<(Vec<Symbol>, Option<Symbol>)> {
    let items = form.as_seq().ok_or_else(|| {
        Error::syntax("fn*", "parameters must be a sequence of symbols")
    })?;

    let mut syms = Vec::with_capacity(items.len());
    for item in items.iter() {
        match item {
            MalVal::Symbol(s) => syms.push(s.clone()),
            other => return Err(Error::type_error_in("fn*", "symbol", other.type_name())),
        }
    }

    let marker = Symbol::new("&");
    let marker_positions: Vec<usize> = syms
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == marker)
        .map(|(i, _)| i)
        .collect();

    match marker_positions.as_slice() {
        [] => Ok((syms, None)),
        [i] if *i + 2 == syms.len() => {
            let rest = syms.pop().expect("rest symbol follows the marker");
            syms.pop(); // drop the marker itself
            Ok((syms, Some(rest)))
        }
        _ => Err(Error::invalid_rest_parameter(
            "'&' must be followed by exactly one symbol",
        )),
    }
}
