// mal-core - Symbol and keyword constructors
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! symbol and keyword: build identifiers from strings at runtime.

use mal_reader::{Keyword, MalVal, Symbol};

use crate::error::{Error, Result};

/// (symbol s) - the interned symbol named s
pub(crate) fn builtin_symbol(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("symbol", 1, args.len()));
    }
    match &args[0] {
        MalVal::String(s) => Ok(MalVal::symbol(Symbol::new(s))),
        MalVal::Symbol(_) => Ok(args[0].clone()),
        other => Err(Error::type_error_in("symbol", "string", other.type_name())),
    }
}

/// (keyword s) - the interned keyword named s; a keyword passes through
pub(crate) fn builtin_keyword(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keyword", 1, args.len()));
    }
    match &args[0] {
        MalVal::String(s) => Ok(MalVal::keyword(Keyword::new(s))),
        MalVal::Keyword(_) => Ok(args[0].clone()),
        other => Err(Error::type_error_in(
            "keyword",
            "string",
            other.type_name(),
        )),
    }
}
