// mal-core - Property-based reader/printer/evaluator tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for the read/print/eval identities:
//!
//! - reading readable output yields an equal term
//! - `(quote t)` evaluates to `t`
//! - `(quasiquote t)` evaluates to `t` when `t` contains no unquoting

mod common;

use common::{Keyword, MalVal, Parser, Symbol, eval, new_env};
use proptest::prelude::*;

/// Symbols that read back as something other than a plain symbol, or that
/// change meaning under quasiquote.
const RESERVED: &[&str] = &[
    "nil",
    "true",
    "false",
    "unquote",
    "splice-unquote",
];

fn arb_symbol() -> impl Strategy<Value = MalVal> {
    "[a-z][a-z0-9-]{0,8}"
        .prop_filter("reserved word", |s| !RESERVED.contains(&s.as_str()))
        .prop_map(|s| MalVal::symbol(Symbol::new(&s)))
}

fn arb_keyword() -> impl Strategy<Value = MalVal> {
    "[a-z][a-z0-9-]{0,8}".prop_map(|s| MalVal::keyword(Keyword::new(&s)))
}

/// Printable-ASCII strings, including quotes and backslashes so escaping is
/// exercised.
fn arb_string() -> impl Strategy<Value = MalVal> {
    "[ -~]{0,12}".prop_map(MalVal::string)
}

fn arb_term() -> impl Strategy<Value = MalVal> {
    let leaf = prop_oneof![
        Just(MalVal::Nil),
        any::<bool>().prop_map(MalVal::bool),
        any::<i64>().prop_map(MalVal::int),
        arb_symbol(),
        arb_keyword(),
        arb_string(),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(MalVal::list),
            prop::collection::vec(inner.clone(), 0..4).prop_map(MalVal::vector),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..3).prop_map(|pairs| {
                MalVal::map(
                    pairs
                        .into_iter()
                        .map(|(k, v)| (MalVal::keyword(Keyword::new(&k)), v))
                        .collect(),
                )
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// read(print_readable(t)) = t
    #[test]
    fn readable_output_reparses_to_equal_term(t in arb_term()) {
        let printed = format!("{}", t);
        let reread = Parser::parse_str(&printed)
            .expect("readable output must lex and parse")
            .expect("readable output contains one form");
        prop_assert_eq!(&reread, &t, "printed form: {}", printed);
    }

    /// eval((quote t), env) = t
    #[test]
    fn quote_evaluates_to_identity(t in arb_term()) {
        let env = new_env();
        let quoted = MalVal::list(vec![
            MalVal::symbol(Symbol::new("quote")),
            t.clone(),
        ]);
        prop_assert_eq!(eval(&quoted, &env).unwrap(), t);
    }

    /// eval((quasiquote t), env) = t when t has no unquote forms
    #[test]
    fn quasiquote_without_unquote_is_identity(t in arb_term()) {
        let env = new_env();
        let quasiquoted = MalVal::list(vec![
            MalVal::symbol(Symbol::new("quasiquote")),
            t.clone(),
        ]);
        prop_assert_eq!(eval(&quasiquoted, &env).unwrap(), t);
    }
}
