//! Lexical analysis.
//! Turns source text into tokens, one token per call.
// Copyright (C) 2018 Alexander Koch
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

use crate::error::{Error, ErrorKind, Position};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Keyword {
    Begin,
    End,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TokenType {
    Eof,
    Integer,
    Identifier,
    Keyword(Keyword),
    Assign,
    Semicolon,
    Dot,
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
}

/// Payload carried by a token.
#[derive(PartialEq, Clone, Debug)]
pub enum TokenValue {
    Integer(i64),
    Name(String),
    Symbol(char),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TokenValue::Integer(v) => write!(f, "{}", v),
            TokenValue::Name(ref s) => write!(f, "{}", s),
            TokenValue::Symbol(c) => write!(f, "{}", c),
        }
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct Token {
    pub typ: TokenType,
    pub value: Option<TokenValue>,
    pub position: Position,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value {
            Some(ref v) => write!(f, "Token({:?}, {})", self.typ, v),
            None => write!(f, "Token({:?})", self.typ),
        }
    }
}

pub type LexicalResult<T> = ::std::result::Result<T, Error>;

pub struct Lexer<'a> {
    data: &'a str,
    cursor: usize,
    current: Option<char>,
    position: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer structure
    ///
    /// # Arguments
    ///
    /// * `src` - The source code string.
    ///
    pub fn new(src: &str) -> Lexer {
        let first = src.chars().next();
        Lexer {
            data: src,
            cursor: 0,
            current: first,
            position: Position::new(1, 1),
        }
    }

    /// Consume a character
    fn consume(&mut self) {
        let c = match self.current {
            Some(c) => c,
            None => return,
        };
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.current = self.data[self.cursor..].chars().next();
    }

    /// Test if the current character is equal to c
    fn curr_is(&self, c: char) -> bool {
        self.current == Some(c)
    }

    fn err(&self, msg: &str, position: Position) -> Error {
        Error::new(ErrorKind::Lexical, msg, position)
    }

    fn token(&self, typ: TokenType, value: Option<TokenValue>, position: Position) -> Token {
        Token {
            typ: typ,
            value: value,
            position: position,
        }
    }

    fn skip_space(&mut self) {
        while self.current.map(|c| c.is_whitespace()).unwrap_or(false) {
            self.consume();
        }
    }

    fn scan_integer(&mut self) -> LexicalResult<Token> {
        let start = self.cursor;
        let position = self.position;

        while let Some(c) = self.current {
            if c.is_ascii_digit() {
                self.consume();
            } else {
                break;
            }
        }

        let s = &self.data[start..self.cursor];
        match s.parse::<i64>() {
            Ok(v) => Ok(self.token(TokenType::Integer, Some(TokenValue::Integer(v)), position)),
            Err(_) => Err(self.err(
                &format!("integer literal `{}` out of range", s),
                position,
            )),
        }
    }

    fn scan_identifier(&mut self) -> LexicalResult<Token> {
        let start = self.cursor;
        let position = self.position;
        while self.current.map(|c| c.is_alphanumeric()).unwrap_or(false) {
            self.consume();
        }

        let s = &self.data[start..self.cursor];
        let kind = match s {
            "BEGIN" => TokenType::Keyword(Keyword::Begin),
            "END" => TokenType::Keyword(Keyword::End),
            _ => TokenType::Identifier,
        };
        Ok(self.token(kind, Some(TokenValue::Name(s.to_owned())), position))
    }

    fn scan_punctuation(&mut self, c: char) -> LexicalResult<Token> {
        let position = self.position;
        self.consume();

        let kind = match c {
            ';' => TokenType::Semicolon,
            '.' => TokenType::Dot,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Multiply,
            '/' => TokenType::Divide,
            '(' => TokenType::LParen,
            ')' => TokenType::RParen,
            ':' => {
                if self.curr_is('=') {
                    self.consume();
                    return Ok(self.token(
                        TokenType::Assign,
                        Some(TokenValue::Symbol('=')),
                        position,
                    ));
                } else {
                    return Err(self.err("expected `=` after `:`", position));
                }
            }
            _ => return Err(self.err(&format!("invalid character `{}`", c), position)),
        };

        Ok(self.token(kind, Some(TokenValue::Symbol(c)), position))
    }

    /// Scans the next token.
    /// Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> LexicalResult<Token> {
        self.skip_space();
        match self.current {
            None => Ok(self.token(TokenType::Eof, None, self.position)),
            Some(c) if c.is_ascii_digit() => self.scan_integer(),
            Some(c) if c.is_alphabetic() => self.scan_identifier(),
            Some(c) => self.scan_punctuation(c),
        }
    }

    /// Tokenizes the remaining source code into a vector of tokens.
    /// The terminating `Eof` is not included.
    pub fn run(&mut self) -> LexicalResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.typ == TokenType::Eof {
                return Ok(tokens);
            }
            tokens.push(token);
        }
    }
}
