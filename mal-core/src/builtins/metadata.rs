// mal-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! with-meta and meta. Metadata attaches to collections and functions and
//! is invisible to equality and printing.

use mal_reader::MalVal;

use crate::error::{Error, Result};

/// (with-meta x m) - a copy of x carrying m as metadata; `^m x` reads as
/// this form
pub(crate) fn builtin_with_meta(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("with-meta", 2, args.len()));
    }
    args[0].with_meta(args[1].clone()).ok_or_else(|| {
        Error::type_error_in("with-meta", "collection or fn", args[0].type_name())
    })
}

/// (meta x) - the attached metadata, or nil
pub(crate) fn builtin_meta(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("meta", 1, args.len()));
    }
    Ok(args[0].meta())
}
