// mal-reader - Parser for Mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Mal source code.
//!
//! Converts tokens into `MalVal` AST nodes. The quote-family reader macros
//! desugar here: `'x` reads as `(quote x)`, `` `x `` as `(quasiquote x)`,
//! `~x` as `(unquote x)`, `~@x` as `(splice-unquote x)`, `@x` as `(deref x)`
//! and `^m x` as `(with-meta x m)`.

use std::fmt;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::value::MalVal;

/// Parser error with position information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `MalVal` AST nodes.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        // Capture position before first token
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<MalVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<MalVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<MalVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<MalVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        // Capture position of the next token before fetching it
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}', found '{}'",
                expected, self.current
            )))
        }
    }

    fn parse_form(&mut self) -> Result<MalVal, ParseError> {
        match &self.current {
            // Literals
            Token::Nil => {
                self.advance()?;
                Ok(MalVal::nil())
            }
            Token::True => {
                self.advance()?;
                Ok(MalVal::bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(MalVal::bool(false))
            }
            Token::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(MalVal::int(n))
            }
            Token::String(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(MalVal::string(s))
            }
            Token::Symbol(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(MalVal::symbol(Symbol::new(&s)))
            }
            Token::Keyword(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(MalVal::keyword(Keyword::new(&s)))
            }

            // Collections
            Token::LParen => self.parse_list(),
            Token::LBracket => self.parse_vector(),
            Token::LBrace => self.parse_map(),

            // Reader macros
            Token::Quote => self.parse_quote("quote"),
            Token::Quasiquote => self.parse_quote("quasiquote"),
            Token::Unquote => self.parse_quote("unquote"),
            Token::SpliceUnquote => self.parse_quote("splice-unquote"),
            Token::Deref => self.parse_quote("deref"),
            Token::Meta => self.parse_meta(),

            // Unexpected tokens
            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("Unexpected end of input".to_string())),
        }
    }

    fn parse_list(&mut self) -> Result<MalVal, ParseError> {
        self.advance()?; // consume (
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RParen | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RParen)?;
        Ok(MalVal::list(elements))
    }

    fn parse_vector(&mut self) -> Result<MalVal, ParseError> {
        self.advance()?; // consume [
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RBracket | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RBracket)?;
        Ok(MalVal::vector(elements))
    }

    fn parse_map(&mut self) -> Result<MalVal, ParseError> {
        self.advance()?; // consume {
        let mut pairs = Vec::new();

        while !matches!(self.current, Token::RBrace | Token::Eof) {
            let key = self.parse_form()?;
            if matches!(self.current, Token::RBrace | Token::Eof) {
                return Err(
                    self.error("Map literal must contain an even number of forms".to_string())
                );
            }
            let value = self.parse_form()?;
            pairs.push((key, value));
        }

        self.expect(&Token::RBrace)?;
        Ok(MalVal::map(pairs))
    }

    fn parse_quote(&mut self, name: &str) -> Result<MalVal, ParseError> {
        self.advance()?; // consume the quote token
        let form = self.parse_form()?;
        Ok(MalVal::list(vec![
            MalVal::symbol(Symbol::new(name)),
            form,
        ]))
    }

    /// `^ m x` reads the metadata form first, then the value form, and
    /// desugars to `(with-meta x m)`.
    fn parse_meta(&mut self) -> Result<MalVal, ParseError> {
        self.advance()?; // consume ^
        let meta = self.parse_form()?;
        let form = self.parse_form()?;
        Ok(MalVal::list(vec![
            MalVal::symbol(Symbol::new("with-meta")),
            form,
            meta,
        ]))
    }
}

// ============================================================================
// Tests
// ============================================================================
