// mal-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for Mal.

use std::any::Any;
use std::rc::Rc;

use mal_reader::{MalFn, MalNativeFn, MalVal};

use super::eval;
use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[MalVal]) -> Result<MalVal>;

/// Apply a function to already-evaluated arguments.
///
/// This is the non-tail entry point used by built-ins (`apply`, `map`,
/// `swap!`); the evaluator's own application path tail-continues instead.
/// Macros are rejected: they are only invocable during expansion.
pub fn apply(func: &MalVal, args: &[MalVal]) -> Result<MalVal> {
    match func {
        MalVal::NativeFn(f) => apply_native(f, args),
        MalVal::Fn(f) if !f.is_macro => apply_fn(f, args),
        other => Err(Error::not_callable(other)),
    }
}

/// Apply a user-defined function (or a macro, during expansion).
pub(crate) fn apply_fn(func: &MalFn, args: &[MalVal]) -> Result<MalVal> {
    let fn_env = bind_params(func, args)?;
    eval(&func.body, &fn_env)
}

/// Build the call environment: a child of the captured environment with each
/// positional parameter bound to its argument and the rest parameter, if
/// any, bound to a List of the remaining arguments (possibly empty).
pub(crate) fn bind_params(func: &MalFn, args: &[MalVal]) -> Result<Env> {
    if !func.matches(args.len()) {
        return Err(if func.rest_param.is_some() {
            Error::arity_at_least(func.params.len(), args.len())
        } else {
            Error::arity(func.params.len(), args.len())
        });
    }

    // Downcast the type-erased captured environment
    let captured = func
        .env
        .downcast_ref::<Env>()
        .ok_or_else(|| Error::internal("Function environment has invalid type"))?;

    let fn_env = captured.child();
    for (param, arg) in func.params.iter().zip(args.iter()) {
        fn_env.define(param.clone(), arg.clone());
    }
    if let Some(rest) = &func.rest_param {
        let rest_args: Vec<MalVal> = args[func.params.len()..].to_vec();
        fn_env.define(rest.clone(), MalVal::list(rest_args));
    }
    Ok(fn_env)
}

/// Apply a native function.
pub(crate) fn apply_native(func: &MalNativeFn, args: &[MalVal]) -> Result<MalVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .ok_or_else(|| Error::internal("Native function has invalid type"))?;
    f(args)
}

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[MalVal]) -> Result<MalVal> + 'static,
) -> MalNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    MalNativeFn::new(name, func_any)
}
