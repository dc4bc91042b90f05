// mal-core - Function and closure integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for fn*, closures, rest parameters and tail calls.

mod common;

use common::{MalVal, eval_all, eval_str_with_env, new_env};

// =============================================================================
// Basic application
// =============================================================================

#[test]
fn test_fn_and_call() {
    let env = new_env();
    eval_str_with_env("(def! sq (fn* [n] (* n n)))", &env).unwrap();
    assert_eval_with_env!("(sq 5)", MalVal::int(25), &env);
}

#[test]
fn test_immediate_application() {
    assert_eval!("((fn* (a b) (+ a b)) 2 3)", MalVal::int(5));
}

#[test]
fn test_params_as_list_or_vector() {
    assert_eval!("((fn* (a) a) 1)", MalVal::int(1));
    assert_eval!("((fn* [a] a) 1)", MalVal::int(1));
}

#[test]
fn test_arity_mismatch() {
    assert_eval_err!("((fn* (a b) a) 1)");
    assert_eval_err!("((fn* (a) a) 1 2)");
    assert_eval_err!("((fn* () 1) 2)");
}

// =============================================================================
// Rest parameters
// =============================================================================

#[test]
fn test_rest_param_collects_list() {
    assert_eval!(
        "((fn* (a & more) more) 1 2 3)",
        MalVal::list(vec![MalVal::int(2), MalVal::int(3)])
    );
}

#[test]
fn test_rest_param_may_be_empty() {
    assert_eval!("((fn* (a & more) more) 1)", MalVal::empty_list());
    assert_eval!("((fn* (& all) all) )", MalVal::empty_list());
}

#[test]
fn test_rest_param_still_requires_positionals() {
    assert_eval_err!("((fn* (a b & more) more) 1)");
}

#[test]
fn test_rest_marker_position_errors() {
    // `&` anywhere but the penultimate position is rejected at construction
    assert_eval_err!("(fn* (& a b) a)");
    assert_eval_err!("(fn* (a &) a)");
    assert_eval_err!("(fn* (a & b c) a)");
}

// =============================================================================
// Closures
// =============================================================================

#[test]
fn test_closure_captures_environment() {
    let env = new_env();
    eval_all(
        "(def! gen-plus (fn* (a) (fn* (b) (+ a b))))
         (def! plus5 (gen-plus 5))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!("(plus5 7)", MalVal::int(12), &env);
}

#[test]
fn test_closure_params_shadow_outer_mutations() {
    let env = new_env();
    eval_all("(def! x 1) (def! f (fn* (x) x)) (def! x 99)", &env).unwrap();
    // The parameter x is the function's own binding; the outer redefinition
    // is invisible through it
    assert_eval_with_env!("(f 5)", MalVal::int(5), &env);
}

#[test]
fn test_closure_sees_later_root_definitions() {
    let env = new_env();
    eval_all("(def! f (fn* () later)) (def! later 42)", &env).unwrap();
    assert_eval_with_env!("(f)", MalVal::int(42), &env);
}

#[test]
fn test_recursion_through_global_binding() {
    let env = new_env();
    eval_str_with_env(
        "(def! fact (fn* (n) (if (= n 0) 1 (* n (fact (- n 1))))))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!("(fact 10)", MalVal::int(3628800), &env);
}

// =============================================================================
// Tail calls
// =============================================================================

#[test]
fn test_deep_tail_recursion_completes() {
    let env = new_env();
    eval_str_with_env(
        "(def! countdown (fn* (n) (if (= n 0) :done (countdown (- n 1)))))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!(
        "(countdown 100000)",
        MalVal::keyword(common::Keyword::new("done")),
        &env
    );
}

#[test]
fn test_mutual_tail_recursion_completes() {
    let env = new_env();
    eval_all(
        "(def! even2? (fn* (n) (if (= n 0) true (odd2? (- n 1)))))
         (def! odd2? (fn* (n) (if (= n 0) false (even2? (- n 1)))))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!("(even2? 100000)", MalVal::bool(true), &env);
}

#[test]
fn test_tail_position_in_do_and_let() {
    let env = new_env();
    eval_str_with_env(
        "(def! loop-do (fn* (n) (if (= n 0) n (do nil (loop-do (- n 1))))))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!("(loop-do 50000)", MalVal::int(0), &env);

    eval_str_with_env(
        "(def! loop-let (fn* (n) (if (= n 0) n (let* (m (- n 1)) (loop-let m)))))",
        &env,
    )
    .unwrap();
    assert_eval_with_env!("(loop-let 50000)", MalVal::int(0), &env);
}
