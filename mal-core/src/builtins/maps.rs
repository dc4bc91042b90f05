// mal-core - Map built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Map operations: hash-map, assoc, dissoc, get, contains?, keys, vals
//!
//! Keys are restricted to strings and keywords; `hash-map` and `assoc`
//! enforce this. Insertion with an existing key replaces its value.

use mal_reader::MalVal;

use crate::error::{Error, Result};

use super::check_map_key;

pub(crate) fn builtin_hash_map(args: &[MalVal]) -> Result<MalVal> {
    if !args.len().is_multiple_of(2) {
        return Err(Error::syntax(
            "hash-map",
            "requires an even number of arguments",
        ));
    }
    let mut pairs = Vec::with_capacity(args.len() / 2);
    for pair in args.chunks(2) {
        check_map_key("hash-map", &pair[0])?;
        pairs.push((pair[0].clone(), pair[1].clone()));
    }
    Ok(MalVal::map(pairs))
}

/// (assoc map k v …) - a new map with the pairs added
pub(crate) fn builtin_assoc(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("assoc", 1, 0));
    }
    if !(args.len() - 1).is_multiple_of(2) {
        return Err(Error::syntax(
            "assoc",
            "requires an even number of key-value arguments",
        ));
    }
    let mut map = match &args[0] {
        MalVal::Map(map, _) => map.clone(),
        other => return Err(Error::type_error_in("assoc", "map", other.type_name())),
    };
    for pair in args[1..].chunks(2) {
        check_map_key("assoc", &pair[0])?;
        map.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(MalVal::Map(map, None))
}

/// (dissoc map k …) - a new map with the keys removed
pub(crate) fn builtin_dissoc(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("dissoc", 1, 0));
    }
    let mut map = match &args[0] {
        MalVal::Map(map, _) => map.clone(),
        other => return Err(Error::type_error_in("dissoc", "map", other.type_name())),
    };
    for key in &args[1..] {
        map.remove(key);
    }
    Ok(MalVal::Map(map, None))
}

/// (get map k) - the value for k, or nil; nil maps to nil
pub(crate) fn builtin_get(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("get", 2, args.len()));
    }
    match &args[0] {
        MalVal::Nil => Ok(MalVal::Nil),
        MalVal::Map(map, _) => Ok(map.get(&args[1]).cloned().unwrap_or(MalVal::Nil)),
        other => Err(Error::type_error_in("get", "map", other.type_name())),
    }
}

pub(crate) fn builtin_contains_p(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("contains?", 2, args.len()));
    }
    match &args[0] {
        MalVal::Nil => Ok(MalVal::bool(false)),
        MalVal::Map(map, _) => Ok(MalVal::bool(map.contains_key(&args[1]))),
        other => Err(Error::type_error_in(
            "contains?",
            "map",
            other.type_name(),
        )),
    }
}

pub(crate) fn builtin_keys(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keys", 1, args.len()));
    }
    match &args[0] {
        MalVal::Map(map, _) => Ok(MalVal::list(map.keys().cloned().collect())),
        other => Err(Error::type_error_in("keys", "map", other.type_name())),
    }
}

pub(crate) fn builtin_vals(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vals", 1, args.len()));
    }
    match &args[0] {
        MalVal::Map(map, _) => Ok(MalVal::list(map.values().cloned().collect())),
        other => Err(Error::type_error_in("vals", "map", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mal_reader::Keyword;

    fn kw(name: &str) -> MalVal {
        MalVal::keyword(Keyword::new(name))
    }

    #[test]
    fn test_hash_map_rejects_bad_keys() {
        assert!(builtin_hash_map(&[MalVal::int(1), MalVal::int(2)]).is_err());
        assert!(builtin_hash_map(&[kw("a")]).is_err());
        assert!(builtin_hash_map(&[kw("a"), MalVal::int(1)]).is_ok());
    }

    #[test]
    fn test_assoc_dissoc_roundtrip() {
        let m = builtin_hash_map(&[]).unwrap();
        let m = builtin_assoc(&[m, kw("a"), MalVal::int(1)]).unwrap();
        assert_eq!(
            builtin_get(&[m.clone(), kw("a")]).unwrap(),
            MalVal::int(1)
        );
        let m = builtin_dissoc(&[m, kw("a")]).unwrap();
        assert_eq!(builtin_get(&[m, kw("a")]).unwrap(), MalVal::Nil);
    }

    #[test]
    fn test_get_on_nil() {
        assert_eq!(builtin_get(&[MalVal::Nil, kw("a")]).unwrap(), MalVal::Nil);
    }

    #[test]
    fn test_keys_vals() {
        let m = builtin_hash_map(&[kw("a"), MalVal::int(1), kw("b"), MalVal::int(2)]).unwrap();
        let keys = builtin_keys(&[m.clone()]).unwrap();
        let vals = builtin_vals(&[m]).unwrap();
        assert_eq!(keys, MalVal::list(vec![kw("a"), kw("b")]));
        assert_eq!(vals, MalVal::list(vec![MalVal::int(1), MalVal::int(2)]));
    }
}
