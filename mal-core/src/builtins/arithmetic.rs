// mal-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /

use mal_reader::MalVal;

use crate::error::{Error, Result};

use super::as_number;

pub(crate) fn builtin_add(args: &[MalVal]) -> Result<MalVal> {
    let mut sum: i64 = 0;
    for arg in args {
        sum += as_number("+", arg)?;
    }
    Ok(MalVal::int(sum))
}

pub(crate) fn builtin_sub(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("-", 1, 0));
    }

    let first = as_number("-", &args[0])?;
    if args.len() == 1 {
        // Unary negation
        return Ok(MalVal::int(-first));
    }

    let mut result = first;
    for arg in &args[1..] {
        result -= as_number("-", arg)?;
    }
    Ok(MalVal::int(result))
}

pub(crate) fn builtin_mul(args: &[MalVal]) -> Result<MalVal> {
    let mut product: i64 = 1;
    for arg in args {
        product *= as_number("*", arg)?;
    }
    Ok(MalVal::int(product))
}

pub(crate) fn builtin_div(args: &[MalVal]) -> Result<MalVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("/", 1, 0));
    }

    let first = as_number("/", &args[0])?;
    if args.len() == 1 {
        // Unary reciprocal (integer division)
        if first == 0 {
            return Err(Error::division_by_zero());
        }
        return Ok(MalVal::int(1 / first));
    }

    let mut result = first;
    for arg in &args[1..] {
        let divisor = as_number("/", arg)?;
        if divisor == 0 {
            return Err(Error::division_by_zero());
        }
        result /= divisor;
    }
    Ok(MalVal::int(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(builtin_add(&[]).unwrap(), MalVal::int(0));
        assert_eq!(
            builtin_add(&[MalVal::int(1), MalVal::int(2), MalVal::int(3)]).unwrap(),
            MalVal::int(6)
        );
    }

    #[test]
    fn test_sub() {
        assert_eq!(builtin_sub(&[MalVal::int(5)]).unwrap(), MalVal::int(-5));
        assert_eq!(
            builtin_sub(&[MalVal::int(10), MalVal::int(3), MalVal::int(2)]).unwrap(),
            MalVal::int(5)
        );
        assert!(builtin_sub(&[]).is_err());
    }

    #[test]
    fn test_mul() {
        assert_eq!(builtin_mul(&[]).unwrap(), MalVal::int(1));
        assert_eq!(
            builtin_mul(&[MalVal::int(2), MalVal::int(3), MalVal::int(4)]).unwrap(),
            MalVal::int(24)
        );
    }

    #[test]
    fn test_div() {
        assert_eq!(
            builtin_div(&[MalVal::int(12), MalVal::int(3), MalVal::int(2)]).unwrap(),
            MalVal::int(2)
        );
        assert!(builtin_div(&[MalVal::int(1), MalVal::int(0)]).is_err());
    }

    #[test]
    fn test_type_mismatch() {
        assert!(builtin_add(&[MalVal::string("x")]).is_err());
    }
}
