// mal-core - Quasiquote integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for quasiquote, unquote and splice-unquote.

mod common;

use common::MalVal;

fn ints(ns: &[i64]) -> Vec<MalVal> {
    ns.iter().map(|n| MalVal::int(*n)).collect()
}

#[test]
fn test_quasiquote_of_plain_data_is_identity() {
    assert_eval!("`7", MalVal::int(7));
    assert_eval!("`a", MalVal::symbol(common::Symbol::new("a")));
    assert_eval!("`(1 2 3)", MalVal::list(ints(&[1, 2, 3])));
    assert_eval!("`()", MalVal::empty_list());
    assert_eval!("`nil", MalVal::Nil);
}

#[test]
fn test_unquote_evaluates() {
    assert_eval!("`(1 ~(+ 1 1) 3)", MalVal::list(ints(&[1, 2, 3])));
    let env = common::new_env();
    common::eval_str_with_env("(def! x 9)", &env).unwrap();
    assert_eval_with_env!("`(x ~x)", MalVal::list(vec![
        MalVal::symbol(common::Symbol::new("x")),
        MalVal::int(9),
    ]), &env);
}

#[test]
fn test_splice_unquote_splices() {
    assert_eval!(
        "`(1 ~(+ 1 1) ~@(list 3 4) 5)",
        MalVal::list(ints(&[1, 2, 3, 4, 5]))
    );
    assert_eval!("`(~@(list) 1)", MalVal::list(ints(&[1])));
    assert_eval!("`(0 ~@(list 1 2))", MalVal::list(ints(&[0, 1, 2])));
}

#[test]
fn test_nested_quasiquote_structures() {
    assert_eval!(
        "`(1 (2 ~(+ 1 2)))",
        MalVal::list(vec![
            MalVal::int(1),
            MalVal::list(vec![MalVal::int(2), MalVal::int(3)]),
        ])
    );
}

#[test]
fn test_quasiquoted_vector_elements() {
    // Vector quasiquote preserves element equality; List and Vector compare
    // cross-variant, so the result's concrete tag is free to be either
    let result = common::eval_str("`[1 ~(+ 1 1) ~@(list 3 4)]").unwrap();
    assert_eq!(result, MalVal::list(ints(&[1, 2, 3, 4])));
}

#[test]
fn test_quasiquote_of_map_is_identity() {
    let result = common::eval_str("`{:a (+ 1 1)}").unwrap();
    // Maps are quoted verbatim: the value expression stays unevaluated
    let expected = MalVal::map(vec![(
        MalVal::keyword(common::Keyword::new("a")),
        MalVal::list(vec![
            MalVal::symbol(common::Symbol::new("+")),
            MalVal::int(1),
            MalVal::int(1),
        ]),
    )]);
    assert_eq!(result, expected);
}

#[test]
fn test_splice_unquote_of_non_sequence_is_error() {
    assert_eval_err!("`(1 ~@2)");
}

#[test]
fn test_quasiquote_arity() {
    assert_eval_err!("(quasiquote)");
    assert_eval_err!("(quasiquote 1 2)");
}
