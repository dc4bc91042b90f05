// mal-core - Exception handling
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Exception handling: the `try*`/`catch*` special form.
//!
//! `try*` is the only form that catches. Any error — user `throw` or a host
//! failure like an arity mismatch — unwinds to the nearest `try*`, which
//! binds the error's term form (see [`crate::error::Error::to_value`]) to
//! the catch symbol in a child environment and evaluates the handler there.

use mal_reader::{MalVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::eval;

/// (try* body (catch* name handler))
pub fn eval_try(args: &[MalVal], env: &Env) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "try*",
            "requires a body and a catch* clause",
        ));
    }
    let (binding, handler) = parse_catch(&args[1])?;

    match eval(&args[0], env) {
        Ok(val) => Ok(val),
        Err(e) => {
            let catch_env = env.child();
            catch_env.define(binding, e.to_value());
            eval(&handler, &catch_env)
        }
    }
}

/// Pull the binding symbol and handler body out of a `(catch* name handler)`
/// clause.
fn parse_catch(form: &MalVal) -> Result<(Symbol, MalVal)> {
    let items = match form {
        MalVal::List(items, _) => items,
        other => {
            return Err(Error::type_error_in(
                "try*",
                "catch* clause",
                other.type_name(),
            ));
        }
    };
    if items.len() != 3 {
        return Err(Error::syntax(
            "try*",
            "catch* requires a binding symbol and a handler",
        ));
    }
    match items.front() {
        Some(MalVal::Symbol(sym)) if sym.name() == "catch*" => {}
        _ => {
            return Err(Error::syntax(
                "try*",
                "second argument must be a catch* clause",
            ));
        }
    }
    let binding = match &items[1] {
        MalVal::Symbol(s) => s.clone(),
        other => {
            return Err(Error::type_error_in(
                "catch*",
                "symbol",
                other.type_name(),
            ));
        }
    };
    Ok((binding, items[2].clone()))
}
