// mal-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Mal.
//!
//! Each built-in is a plain `fn(&[MalVal]) -> Result<MalVal>` taking
//! already-evaluated arguments. [`register_builtins`] installs the whole
//! table into a root environment before the bootstrap forms run.

mod arithmetic;
mod atoms;
mod comparison;
mod exceptions;
mod higher_order;
mod io;
mod maps;
mod metadata;
mod predicates;
mod sequences;
mod strings;

use mal_reader::{MalVal, Symbol};

use crate::env::Env;
use crate::error::{Error, Result};
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_deref, builtin_reset, builtin_swap};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use exceptions::builtin_throw;
use higher_order::{builtin_apply, builtin_map};
use io::{builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_slurp,
    builtin_str};
use maps::{
    builtin_assoc, builtin_contains_p, builtin_dissoc, builtin_get, builtin_hash_map,
    builtin_keys, builtin_vals,
};
use metadata::{builtin_meta, builtin_with_meta};
use predicates::{
    builtin_atom_p, builtin_false_p, builtin_fn_p, builtin_keyword_p, builtin_list_p,
    builtin_macro_p, builtin_map_p, builtin_nil_p, builtin_number_p, builtin_sequential_p,
    builtin_string_p, builtin_symbol_p, builtin_true_p, builtin_vector_p,
};
use sequences::{
    builtin_concat, builtin_cons, builtin_count, builtin_empty_p, builtin_first, builtin_list,
    builtin_nth, builtin_rest, builtin_vec, builtin_vector,
};
use strings::{builtin_keyword, builtin_symbol};

/// Register all built-in functions into the given (root) environment.
///
/// Call this before [`crate::init_stdlib`]; the bootstrap forms rely on the
/// table being complete.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);

    // Type predicates
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("sequential?", builtin_sequential_p);
    env.define_native("map?", builtin_map_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("macro?", builtin_macro_p);
    env.define_native("atom?", builtin_atom_p);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("vec", builtin_vec);
    env.define_native("count", builtin_count);
    env.define_native("empty?", builtin_empty_p);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("nth", builtin_nth);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);

    // Maps
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("assoc", builtin_assoc);
    env.define_native("dissoc", builtin_dissoc);
    env.define_native("get", builtin_get);
    env.define_native("contains?", builtin_contains_p);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Constructors
    env.define_native("symbol", builtin_symbol);
    env.define_native("keyword", builtin_keyword);

    // Higher order
    env.define_native("apply", builtin_apply);
    env.define_native("map", builtin_map);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Metadata
    env.define_native("with-meta", builtin_with_meta);
    env.define_native("meta", builtin_meta);

    // Exceptions
    env.define_native("throw", builtin_throw);

    // I/O
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);

    // eval resumes in the root environment, so it closes over the frame it
    // is registered into
    let root = env.clone();
    env.define(
        Symbol::new("eval"),
        MalVal::NativeFn(make_native_fn("eval", move |args| {
            if args.len() != 1 {
                return Err(Error::arity_named("eval", 1, args.len()));
            }
            crate::eval::eval(&args[0], &root)
        })),
    );
}

/// Helper trait so builtin registration reads as a table.
trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[MalVal]) -> Result<MalVal>) {
        let native = make_native_fn(name, func);
        self.define(Symbol::new(name), MalVal::NativeFn(native));
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// The elements of a sequential argument. Nil counts as the empty sequence.
pub(crate) fn seq_items(context: &'static str, val: &MalVal) -> Result<Vec<MalVal>> {
    match val {
        MalVal::Nil => Ok(Vec::new()),
        MalVal::List(items, _) | MalVal::Vector(items, _) => Ok(items.iter().cloned().collect()),
        other => Err(Error::type_error_in(
            context,
            "sequence",
            other.type_name(),
        )),
    }
}

/// Map keys are restricted to strings and keywords.
pub(crate) fn check_map_key(context: &'static str, key: &MalVal) -> Result<()> {
    match key {
        MalVal::String(_) | MalVal::Keyword(_) => Ok(()),
        other => Err(Error::type_error_in(
            context,
            "string or keyword",
            other.type_name(),
        )),
    }
}

/// The integer value of a numeric argument.
pub(crate) fn as_number(context: &'static str, val: &MalVal) -> Result<i64> {
    match val {
        MalVal::Int(n) => Ok(*n),
        other => Err(Error::type_error_in(context, "number", other.type_name())),
    }
}
