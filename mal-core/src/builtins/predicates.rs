// mal-core - Type predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, true?, false?, symbol?, keyword?, string?,
//! number?, list?, vector?, sequential?, map?, fn?, macro?, atom?

use mal_reader::MalVal;

use crate::error::{Error, Result};

fn unary<'a>(name: &'static str, args: &'a [MalVal]) -> Result<&'a MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named(name, 1, args.len()));
    }
    Ok(&args[0])
}

pub(crate) fn builtin_nil_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(unary("nil?", args)?.is_nil()))
}

pub(crate) fn builtin_true_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("true?", args)?,
        MalVal::Bool(true)
    )))
}

pub(crate) fn builtin_false_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("false?", args)?,
        MalVal::Bool(false)
    )))
}

pub(crate) fn builtin_symbol_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("symbol?", args)?,
        MalVal::Symbol(_)
    )))
}

pub(crate) fn builtin_keyword_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("keyword?", args)?,
        MalVal::Keyword(_)
    )))
}

pub(crate) fn builtin_string_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("string?", args)?,
        MalVal::String(_)
    )))
}

pub(crate) fn builtin_number_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("number?", args)?,
        MalVal::Int(_)
    )))
}

pub(crate) fn builtin_list_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("list?", args)?,
        MalVal::List(_, _)
    )))
}

pub(crate) fn builtin_vector_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("vector?", args)?,
        MalVal::Vector(_, _)
    )))
}

pub(crate) fn builtin_sequential_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("sequential?", args)?,
        MalVal::List(_, _) | MalVal::Vector(_, _)
    )))
}

pub(crate) fn builtin_map_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("map?", args)?,
        MalVal::Map(_, _)
    )))
}

/// Macros are not `fn?`: they are not invocable at runtime.
pub(crate) fn builtin_fn_p(args: &[MalVal]) -> Result<MalVal> {
    let is_fn = match unary("fn?", args)? {
        MalVal::Fn(f) => !f.is_macro,
        MalVal::NativeFn(_) => true,
        _ => false,
    };
    Ok(MalVal::bool(is_fn))
}

pub(crate) fn builtin_macro_p(args: &[MalVal]) -> Result<MalVal> {
    let is_macro = match unary("macro?", args)? {
        MalVal::Fn(f) => f.is_macro,
        _ => false,
    };
    Ok(MalVal::bool(is_macro))
}

pub(crate) fn builtin_atom_p(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::bool(matches!(
        unary("atom?", args)?,
        MalVal::Atom(_)
    )))
}
