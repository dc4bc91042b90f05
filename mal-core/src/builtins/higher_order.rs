// mal-core - Higher-order built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Higher-order operations: apply, map

use mal_reader::MalVal;

use crate::error::{Error, Result};
use crate::eval::apply;

use super::seq_items;

/// (apply f a b … seq) - call f with the leading arguments followed by the
/// elements of the final sequence
pub(crate) fn builtin_apply(args: &[MalVal]) -> Result<MalVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("apply", 2, args.len()));
    }
    let mut call_args: Vec<MalVal> = args[1..args.len() - 1].to_vec();
    call_args.extend(seq_items("apply", &args[args.len() - 1])?);
    apply(&args[0], &call_args)
}

/// (map f seq) - a List of f applied to each element
pub(crate) fn builtin_map(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("map", 2, args.len()));
    }
    let items = seq_items("map", &args[1])?;
    let mut result = Vec::with_capacity(items.len());
    for item in items {
        result.push(apply(&args[0], &[item])?);
    }
    Ok(MalVal::list(result))
}
