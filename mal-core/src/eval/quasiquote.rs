// mal-core - Quasiquote elaboration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Quasiquote rewriting.
//!
//! `quasiquote` rewrites a term into a term whose evaluation produces the
//! intended data: `(unquote y)` unwraps to `y`, `(splice-unquote y)`
//! elements become `concat` calls, everything else becomes `cons`/`quote`
//! chains. The evaluator tail-continues with the rewritten term.

use mal_reader::{MalVal, Symbol, Vector};

/// Rewrite a quasiquoted term.
pub fn quasiquote(ast: &MalVal) -> MalVal {
    match ast {
        MalVal::List(items, _) => {
            if items.is_empty() {
                quote(ast)
            } else if let Some(inner) = as_unquote(items) {
                inner
            } else {
                qq_elements(items)
            }
        }
        // A vector rewrites like a list, wrapped in (vec …) to preserve
        // vectorness of the result
        MalVal::Vector(items, _) => MalVal::list(vec![
            MalVal::symbol(Symbol::new("vec")),
            qq_elements(items),
        ]),
        other => quote(other),
    }
}

fn quote(ast: &MalVal) -> MalVal {
    MalVal::list(vec![MalVal::symbol(Symbol::new("quote")), ast.clone()])
}

/// `(unquote y)` unwraps to `y`.
fn as_unquote(items: &Vector<MalVal>) -> Option<MalVal> {
    if items.len() == 2
        && let Some(MalVal::Symbol(sym)) = items.front()
        && sym.name() == "unquote"
    {
        Some(items[1].clone())
    } else {
        None
    }
}

fn as_splice_unquote(item: &MalVal) -> Option<MalVal> {
    if let MalVal::List(inner, _) = item
        && inner.len() == 2
        && let Some(MalVal::Symbol(sym)) = inner.front()
        && sym.name() == "splice-unquote"
    {
        Some(inner[1].clone())
    } else {
        None
    }
}

/// Build the `cons`/`concat` chain for a sequence, right to left.
fn qq_elements(items: &Vector<MalVal>) -> MalVal {
    let mut acc = MalVal::empty_list();
    for item in items.iter().rev() {
        acc = if let Some(spliced) = as_splice_unquote(item) {
            MalVal::list(vec![
                MalVal::symbol(Symbol::new("concat")),
                spliced,
                acc,
            ])
        } else {
            MalVal::list(vec![
                MalVal::symbol(Symbol::new("cons")),
                quasiquote(item),
                acc,
            ])
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use mal_reader::Parser;

    fn parse(s: &str) -> MalVal {
        Parser::parse_str(s).unwrap().unwrap()
    }

    #[test]
    fn test_non_sequential_quotes() {
        assert_eq!(quasiquote(&parse("x")), parse("(quote x)"));
        assert_eq!(quasiquote(&parse("7")), parse("(quote 7)"));
        assert_eq!(quasiquote(&parse("{:a 1}")), parse("(quote {:a 1})"));
    }

    #[test]
    fn test_empty_list_quotes() {
        assert_eq!(quasiquote(&parse("()")), parse("(quote ())"));
    }

    #[test]
    fn test_unquote_unwraps() {
        assert_eq!(quasiquote(&parse("(unquote a)")), parse("a"));
    }

    #[test]
    fn test_list_builds_cons_chain() {
        assert_eq!(
            quasiquote(&parse("(a b)")),
            parse("(cons (quote a) (cons (quote b) ()))")
        );
    }

    #[test]
    fn test_splice_unquote_builds_concat() {
        assert_eq!(
            quasiquote(&parse("((splice-unquote xs) b)")),
            parse("(concat xs (cons (quote b) ()))")
        );
    }

    #[test]
    fn test_vector_wrapped_in_vec() {
        assert_eq!(
            quasiquote(&parse("[a]")),
            parse("(vec (cons (quote a) ()))")
        );
    }
}
