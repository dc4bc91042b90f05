// mal-core - I/O built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! I/O operations: pr-str, str, prn, println, read-string, slurp
//!
//! The `pr` family renders readably (strings quoted, output re-readable);
//! `str` and `println` render for display (raw string contents).

use mal_reader::{MalVal, Parser};

use crate::error::{Error, Result};

/// (pr-str & args) - args rendered readably, joined with spaces
pub(crate) fn builtin_pr_str(args: &[MalVal]) -> Result<MalVal> {
    let parts: Vec<String> = args.iter().map(|a| format!("{}", a)).collect();
    Ok(MalVal::string(parts.join(" ")))
}

/// (str & args) - args rendered for display, concatenated
pub(crate) fn builtin_str(args: &[MalVal]) -> Result<MalVal> {
    let mut result = String::new();
    for arg in args {
        result.push_str(&arg.display_string());
    }
    Ok(MalVal::string(result))
}

/// (prn & args) - print args readably, joined with spaces, then a newline
pub(crate) fn builtin_prn(args: &[MalVal]) -> Result<MalVal> {
    let parts: Vec<String> = args.iter().map(|a| format!("{}", a)).collect();
    println!("{}", parts.join(" "));
    Ok(MalVal::Nil)
}

/// (println & args) - print args for display, joined with spaces, then a
/// newline
pub(crate) fn builtin_println(args: &[MalVal]) -> Result<MalVal> {
    let parts: Vec<String> = args.iter().map(|a| a.display_string()).collect();
    println!("{}", parts.join(" "));
    Ok(MalVal::Nil)
}

/// (read-string s) - parse one form from s
pub(crate) fn builtin_read_string(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-string", 1, args.len()));
    }
    let s = match &args[0] {
        MalVal::String(s) => s.as_ref(),
        other => {
            return Err(Error::type_error_in(
                "read-string",
                "string",
                other.type_name(),
            ));
        }
    };

    Parser::parse_str(s)
        .map_err(|e| Error::reader(e.to_string()))?
        .ok_or_else(|| Error::reader("read-string: no forms in string"))
}

/// (slurp path) - the contents of the file at path, as a string
pub(crate) fn builtin_slurp(args: &[MalVal]) -> Result<MalVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("slurp", 1, args.len()));
    }
    let path = match &args[0] {
        MalVal::String(s) => s.as_ref(),
        other => return Err(Error::type_error_in("slurp", "string", other.type_name())),
    };

    std::fs::read_to_string(path)
        .map(MalVal::string)
        .map_err(|e| Error::io("slurp", Some(path.to_string()), e))
}
