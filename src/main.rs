// mal - A Clojure-inspired Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::io::{self, Write};
use std::process;

use mal_core::{Env, Error, eval, init_stdlib, register_builtins};
use mal_reader::{MalVal, Parser, Symbol};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --version flag
    if args.len() == 1 && (args[0] == "--version" || args[0] == "-v") {
        println!("Mal v0.1.0");
        return;
    }

    // Create the root environment with builtins and bootstrap forms
    let env = Env::new();
    register_builtins(&env);
    if let Err(e) = init_stdlib(&env) {
        eprintln!("Failed to load stdlib: {}", e);
        process::exit(1);
    }

    // First argument is a script path; the remainder binds to *ARGV*
    let (script, argv) = match args.split_first() {
        Some((script, rest)) => (Some(script.clone()), rest.to_vec()),
        None => (None, Vec::new()),
    };
    env.define(
        Symbol::new("*ARGV*"),
        MalVal::vector(argv.into_iter().map(MalVal::string).collect()),
    );

    match script {
        Some(path) => run_script(&path, &env),
        None => run_repl(&env),
    }
}

/// Evaluate `(load-file "<path>")`; exit non-zero on an uncaught error
fn run_script(path: &str, env: &Env) {
    let form = MalVal::list(vec![
        MalVal::symbol(Symbol::new("load-file")),
        MalVal::string(path.to_string()),
    ]);
    if let Err(e) = eval(&form, env) {
        report_error(&e);
        process::exit(1);
    }
}

/// Print an error's display form followed by the ASTs it unwound through
fn report_error(e: &Error) {
    eprintln!("Error: {}", e);
    for ast in e.trace() {
        eprintln!("  in: {}", ast);
    }
}

/// Run the interactive read-eval-print loop
fn run_repl(env: &Env) {
    println!("Mal v0.1.0");

    loop {
        print!("mal> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                rep(input, env);
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

/// Read, evaluate and print every form on one input line
fn rep(input: &str, env: &Env) {
    let mut parser = match Parser::new(input) {
        Ok(parser) => parser,
        Err(e) => {
            report_error(&Error::from(e));
            return;
        }
    };
    loop {
        match parser.parse() {
            Ok(Some(expr)) => match eval(&expr, env) {
                Ok(result) => println!("{}", result),
                Err(e) => report_error(&e),
            },
            Ok(None) => break,
            Err(e) => {
                report_error(&Error::from(e));
                break;
            }
        }
    }
}
