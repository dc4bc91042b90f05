// mal-core - Sequence built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence operations: list, vector, vec, count, empty?, cons, concat,
//! nth, first, rest
//!
//! List and Vector are interchangeable inputs everywhere here; nil counts
//! as the empty sequence.

use mal_reader::MalVal;

use crate::error::{Error, Result};

use super::{as_number, seq_items};

pub(crate) fn builtin_list(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::list(args.to_vec()))
}

pub(crate) fn builtin_vector(args: &[MalVal]) -> Result<MalVal> {
    Ok(MalVal::vector(args.to_vec()))
}

/// (vec seq) - the same elements as a Vector
pub(crate) fn builtin_vec(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vec", 1, args.len()));
    }
    match &args[0] {
        MalVal::Vector(_, _) => Ok(args[0].clone()),
        other => Ok(MalVal::vector(seq_items("vec", other)?)),
    }
}

pub(crate) fn builtin_count(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("count", 1, args.len()));
    }
    let len = match &args[0] {
        MalVal::Nil => 0,
        MalVal::List(items, _) | MalVal::Vector(items, _) => items.len(),
        MalVal::Map(map, _) => map.len(),
        other => {
            return Err(Error::type_error_in(
                "count",
                "countable",
                other.type_name(),
            ));
        }
    };
    Ok(MalVal::int(len as i64))
}

pub(crate) fn builtin_empty_p(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("empty?", 1, args.len()));
    }
    let empty = match &args[0] {
        MalVal::Nil => true,
        MalVal::List(items, _) | MalVal::Vector(items, _) => items.is_empty(),
        MalVal::Map(map, _) => map.is_empty(),
        other => {
            return Err(Error::type_error_in(
                "empty?",
                "countable",
                other.type_name(),
            ));
        }
    };
    Ok(MalVal::bool(empty))
}

/// (cons x seq) - a List with x prepended
pub(crate) fn builtin_cons(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    let head = args[0].clone();
    match &args[1] {
        MalVal::Nil => Ok(MalVal::list(vec![head])),
        MalVal::List(items, _) | MalVal::Vector(items, _) => {
            let mut new_items = items.clone();
            new_items.push_front(head);
            Ok(MalVal::List(new_items, None))
        }
        other => Err(Error::type_error_in("cons", "sequence", other.type_name())),
    }
}

/// (concat & seqs) - a List of all elements in order
pub(crate) fn builtin_concat(args: &[MalVal]) -> Result<MalVal> {
    let mut result = Vec::new();
    for arg in args {
        result.extend(seq_items("concat", arg)?);
    }
    Ok(MalVal::list(result))
}

pub(crate) fn builtin_nth(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("nth", 2, args.len()));
    }
    let idx = as_number("nth", &args[1])?;
    let items = seq_items("nth", &args[0])?;
    if idx < 0 || idx as usize >= items.len() {
        return Err(Error::index_out_of_bounds(idx, items.len()));
    }
    Ok(items[idx as usize].clone())
}

/// (first seq) - the first element, or nil when empty or nil
pub(crate) fn builtin_first(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("first", 1, args.len()));
    }
    let items = seq_items("first", &args[0])?;
    Ok(items.first().cloned().unwrap_or(MalVal::Nil))
}

/// (rest seq) - a List of everything after the first element; the empty
/// List when the input is empty or nil
pub(crate) fn builtin_rest(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("rest", 1, args.len()));
    }
    let mut items = seq_items("rest", &args[0])?;
    if items.is_empty() {
        Ok(MalVal::empty_list())
    } else {
        items.remove(0);
        Ok(MalVal::list(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(ns: &[i64]) -> Vec<MalVal> {
        ns.iter().map(|n| MalVal::int(*n)).collect()
    }

    #[test]
    fn test_cons_onto_nil_and_vector() {
        assert_eq!(
            builtin_cons(&[MalVal::int(1), MalVal::Nil]).unwrap(),
            MalVal::list(ints(&[1]))
        );
        assert_eq!(
            builtin_cons(&[MalVal::int(1), MalVal::vector(ints(&[2, 3]))]).unwrap(),
            MalVal::list(ints(&[1, 2, 3]))
        );
    }

    #[test]
    fn test_concat_mixes_variants() {
        assert_eq!(
            builtin_concat(&[
                MalVal::list(ints(&[1])),
                MalVal::Nil,
                MalVal::vector(ints(&[2, 3])),
            ])
            .unwrap(),
            MalVal::list(ints(&[1, 2, 3]))
        );
        assert_eq!(builtin_concat(&[]).unwrap(), MalVal::empty_list());
    }

    #[test]
    fn test_nth_bounds() {
        let seq = MalVal::list(ints(&[10, 20]));
        assert_eq!(
            builtin_nth(&[seq.clone(), MalVal::int(1)]).unwrap(),
            MalVal::int(20)
        );
        assert!(builtin_nth(&[seq.clone(), MalVal::int(2)]).is_err());
        assert!(builtin_nth(&[seq, MalVal::int(-1)]).is_err());
    }

    #[test]
    fn test_first_rest() {
        assert_eq!(builtin_first(&[MalVal::Nil]).unwrap(), MalVal::Nil);
        assert_eq!(
            builtin_first(&[MalVal::list(ints(&[1, 2]))]).unwrap(),
            MalVal::int(1)
        );
        assert_eq!(
            builtin_rest(&[MalVal::list(ints(&[1, 2]))]).unwrap(),
            MalVal::list(ints(&[2]))
        );
        assert_eq!(builtin_rest(&[MalVal::Nil]).unwrap(), MalVal::empty_list());
    }

    #[test]
    fn test_count_and_empty() {
        assert_eq!(builtin_count(&[MalVal::Nil]).unwrap(), MalVal::int(0));
        assert_eq!(
            builtin_count(&[MalVal::vector(ints(&[1, 2, 3]))]).unwrap(),
            MalVal::int(3)
        );
        assert_eq!(
            builtin_empty_p(&[MalVal::empty_list()]).unwrap(),
            MalVal::bool(true)
        );
    }
}
