// mal-core - Comparison built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Comparison operations: =, <, <=, >, >=
//!
//! `=` is deep value equality (List and Vector compare cross-variant); the
//! ordering operators are numeric and chain pairwise.

use std::cmp::Ordering;

use mal_reader::MalVal;

use crate::error::{Error, Result};

use super::as_number;

pub(crate) fn builtin_eq(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("=", 1, 0));
    }
    let all_equal = args.windows(2).all(|pair| pair[0] == pair[1]);
    Ok(MalVal::bool(all_equal))
}

fn compare_chain(
    name: &'static str,
    args: &[MalVal],
    pred: fn(Ordering) -> bool,
) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named(name, 1, 0));
    }
    let mut prev = as_number(name, &args[0])?;
    for arg in &args[1..] {
        let next = as_number(name, arg)?;
        if !pred(prev.cmp(&next)) {
            return Ok(MalVal::bool(false));
        }
        prev = next;
    }
    Ok(MalVal::bool(true))
}

pub(crate) fn builtin_lt(args: &[MalVal]) -> Result<MalVal> {
    compare_chain("<", args, Ordering::is_lt)
}

pub(crate) fn builtin_le(args: &[MalVal]) -> Result<MalVal> {
    compare_chain("<=", args, Ordering::is_le)
}

pub(crate) fn builtin_gt(args: &[MalVal]) -> Result<MalVal> {
    compare_chain(">", args, Ordering::is_gt)
}

pub(crate) fn builtin_ge(args: &[MalVal]) -> Result<MalVal> {
    compare_chain(">=", args, Ordering::is_ge)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_deep() {
        let a = MalVal::list(vec![MalVal::int(1), MalVal::int(2)]);
        let b = MalVal::vector(vec![MalVal::int(1), MalVal::int(2)]);
        assert_eq!(builtin_eq(&[a, b]).unwrap(), MalVal::bool(true));
    }

    #[test]
    fn test_eq_chain() {
        assert_eq!(
            builtin_eq(&[MalVal::int(1), MalVal::int(1), MalVal::int(2)]).unwrap(),
            MalVal::bool(false)
        );
        assert_eq!(builtin_eq(&[MalVal::int(1)]).unwrap(), MalVal::bool(true));
    }

    #[test]
    fn test_ordering_chain() {
        assert_eq!(
            builtin_lt(&[MalVal::int(1), MalVal::int(2), MalVal::int(3)]).unwrap(),
            MalVal::bool(true)
        );
        assert_eq!(
            builtin_le(&[MalVal::int(1), MalVal::int(1)]).unwrap(),
            MalVal::bool(true)
        );
        assert_eq!(
            builtin_gt(&[MalVal::int(1), MalVal::int(2)]).unwrap(),
            MalVal::bool(false)
        );
    }

    #[test]
    fn test_ordering_requires_numbers() {
        assert!(builtin_lt(&[MalVal::string("a"), MalVal::string("b")]).is_err());
    }
}
