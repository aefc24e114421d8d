//! Simple Pascal interpreter
// Copyright (c) Alexander Koch 2018
#[macro_use]
extern crate log;

use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod lexer;
pub mod parser;
pub mod visitor;

pub use error::{Error, ErrorKind, Position};
use lexer::Lexer;
use parser::{ast, Parser};
pub use visitor::{Interpreter, LispTranslator, Number, RpnTranslator, Store};

pub type Result<T> = ::std::result::Result<T, Error>;

/// Output notation of the expression translators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Rpn,
    Lisp,
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> ::std::result::Result<Notation, String> {
        match s {
            "rpn" => Ok(Notation::Rpn),
            "lisp" => Ok(Notation::Lisp),
            _ => Err(format!("unknown notation `{}`", s)),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Notation::Rpn => f.write_str("rpn"),
            Notation::Lisp => f.write_str("lisp"),
        }
    }
}

/// Parses a complete `BEGIN ... END.` program.
pub fn generate_ast(input: &str) -> Result<ast::Node> {
    let mut parser = Parser::new(Lexer::new(input))?;
    let program = parser.parse_program()?;
    debug!("{:?}", program);
    Ok(program)
}

/// Parses a bare arithmetic expression.
pub fn generate_expression(input: &str) -> Result<ast::Node> {
    let mut parser = Parser::new(Lexer::new(input))?;
    let expr = parser.parse_expression()?;
    debug!("{:?}", expr);
    Ok(expr)
}

/// Scans the whole input, for inspection.
pub fn tokenize(input: &str) -> Result<Vec<lexer::Token>> {
    Lexer::new(input).run()
}

/// Parses and runs a program against `store`.
///
/// On error the store keeps whatever was assigned before the failing statement.
pub fn run_program(input: &str, store: &mut Store) -> Result<()> {
    let program = generate_ast(input)?;
    Interpreter::new(store).interpret(&program)
}

/// Evaluates an expression. Variables are not available in this mode.
pub fn evaluate_expression(input: &str) -> Result<Number> {
    let expr = generate_expression(input)?;
    let mut store = Store::new();
    Interpreter::new(&mut store).evaluate(&expr)
}

/// Renders an expression in the given notation.
pub fn translate(input: &str, notation: Notation) -> Result<String> {
    let expr = generate_expression(input)?;
    match notation {
        Notation::Rpn => RpnTranslator::new().translate(&expr),
        Notation::Lisp => LispTranslator::new().translate(&expr),
    }
}
