// mal-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, deref, reset!, swap!

use mal_reader::{MalAtom, MalVal};

use crate::error::{Error, Result};
use crate::eval::apply;

fn as_atom(context: &'static str, val: &MalVal) -> Result<MalAtom> {
    match val {
        MalVal::Atom(a) => Ok(a.clone()),
        other => Err(Error::type_error_in(context, "atom", other.type_name())),
    }
}

/// (atom x) - a new atom holding x
pub(crate) fn builtin_atom(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom", 1, args.len()));
    }
    Ok(MalVal::atom(args[0].clone()))
}

/// (deref atom) - the current value; `@a` reads as (deref a)
pub(crate) fn builtin_deref(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("deref", 1, args.len()));
    }
    Ok(as_atom("deref", &args[0])?.deref())
}

/// (reset! atom newval) - replace the value, returning newval
pub(crate) fn builtin_reset(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("reset!", 2, args.len()));
    }
    Ok(as_atom("reset!", &args[0])?.reset(args[1].clone()))
}

/// (swap! atom f & args) - apply f to the current value (and the extra
/// args), store the result, return it
pub(crate) fn builtin_swap(args: &[MalVal]) -> Result<MalVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("swap!", 2, args.len()));
    }
    let atom = as_atom("swap!", &args[0])?;

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);

    let new_val = apply(&args[1], &call_args)?;
    Ok(atom.reset(new_val))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_deref_reset() {
        let a = builtin_atom(&[MalVal::int(1)]).unwrap();
        assert_eq!(builtin_deref(&[a.clone()]).unwrap(), MalVal::int(1));
        assert_eq!(
            builtin_reset(&[a.clone(), MalVal::int(2)]).unwrap(),
            MalVal::int(2)
        );
        assert_eq!(builtin_deref(&[a]).unwrap(), MalVal::int(2));
    }

    #[test]
    fn test_deref_requires_atom() {
        assert!(builtin_deref(&[MalVal::int(1)]).is_err());
    }
}
