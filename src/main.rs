//! Simple Pascal interpreter
// Copyright (c) Alexander Koch 2018
#[macro_use]
extern crate log;

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::process;

use clap::{App, Arg};
use spi::{Error, Notation, Store};

/// What the driver was asked to do.
#[derive(Debug, Clone, PartialEq)]
enum Mode<'a> {
    Program(&'a str),
    Expression(&'a str),
    Calculator,
}

#[derive(Debug, Clone)]
struct ProgramConfig<'a> {
    mode: Mode<'a>,
    notation: Option<Notation>,
    tokens: bool,
}

#[derive(Debug)]
enum DriverError {
    Io(io::Error),
    Spi(Error),
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> DriverError {
        DriverError::Io(e)
    }
}

impl From<Error> for DriverError {
    fn from(e: Error) -> DriverError {
        DriverError::Spi(e)
    }
}

fn read_file(path: &str) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

fn print_tokens(input: &str) -> Result<(), Error> {
    for token in spi::tokenize(input)? {
        println!("{}: {}", token.position, token);
    }
    Ok(())
}

/// One expression pass: evaluate, or translate when a notation is set.
fn expression(input: &str, config: &ProgramConfig) -> Result<String, Error> {
    if config.tokens {
        print_tokens(input)?;
        return Ok(String::new());
    }
    match config.notation {
        Some(notation) => spi::translate(input, notation),
        None => spi::evaluate_expression(input).map(|v| v.to_string()),
    }
}

fn run_file(path: &str, config: &ProgramConfig) -> Result<(), DriverError> {
    debug!("Running {}...", path);
    let content = read_file(path)?;
    if config.tokens {
        return print_tokens(&content).map_err(DriverError::from);
    }

    let mut store = Store::new();
    spi::run_program(&content, &mut store)?;
    print!("{}", store);
    Ok(())
}

/// Reads one expression per line until end of input.
/// A failing line is reported and the loop goes on.
fn calculator(config: &ProgramConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("calc> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        match expression(&line, config) {
            Ok(ref out) if out.is_empty() => {}
            Ok(out) => println!("{}", out),
            Err(e) => println!("{}", e),
        }
    }
    println!();
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("spi")
        .version(VERSION.unwrap_or("Unknown"))
        .about("Interpreter for a small Pascal-like language")
        .arg(Arg::with_name("FILE")
            .help("Program to run; without it an expression calculator starts")
            .required(false))
        .arg(Arg::with_name("expr")
            .help("Evaluates a single expression")
            .value_name("EXPR")
            .takes_value(true)
            .conflicts_with("FILE")
            .short("e")
            .long("expr"))
        .arg(Arg::with_name("translate")
            .help("Renders expressions instead of evaluating them")
            .value_name("NOTATION")
            .takes_value(true)
            .possible_values(&["rpn", "lisp"])
            .conflicts_with("FILE")
            .short("t")
            .long("translate"))
        .arg(Arg::with_name("tokens")
            .help("Prints the token stream instead of running")
            .long("tokens"))
        .get_matches();

    let mode = match (matches.value_of("FILE"), matches.value_of("expr")) {
        (Some(file), _) => Mode::Program(file),
        (None, Some(expr)) => Mode::Expression(expr),
        (None, None) => Mode::Calculator,
    };
    let config = ProgramConfig {
        mode: mode,
        notation: matches.value_of("translate").and_then(|x| x.parse().ok()),
        tokens: matches.is_present("tokens"),
    };
    debug!("{:?}", config);

    let status = match config.mode {
        Mode::Program(file) => match run_file(file, &config) {
            Ok(()) => 0,
            Err(DriverError::Io(e)) => {
                eprintln!("{}: {}", file, e);
                1
            }
            Err(DriverError::Spi(e)) => {
                eprintln!("{}:{}", file, e);
                1
            }
        },
        Mode::Expression(expr) => match expression(expr, &config) {
            Ok(ref out) if out.is_empty() => 0,
            Ok(out) => {
                println!("{}", out);
                0
            }
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        },
        Mode::Calculator => match calculator(&config) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{}", e);
                1
            }
        },
    };
    process::exit(status);
}
