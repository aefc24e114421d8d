//! Source positions and the error type shared by every stage.
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

use std::error;
use std::fmt;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Position {
    pub line: i32,
    pub column: i32,
}

impl Position {
    pub fn new(line: i32, column: i32) -> Position {
        Position {
            line: line,
            column: column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The stage or rule that rejected the input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ErrorKind {
    /// A character the lexer does not recognize.
    Lexical,
    /// Unexpected token, incomplete program or trailing input.
    Syntax,
    /// Read of a variable that was never assigned.
    Name,
    /// Division by zero or integer overflow.
    Arithmetic,
    /// A translator was handed a node it cannot render.
    UnsupportedNode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            ErrorKind::Lexical => "lexical error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Name => "name error",
            ErrorKind::Arithmetic => "arithmetic error",
            ErrorKind::UnsupportedNode => "unsupported node",
        };
        f.write_str(s)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl Error {
    pub fn new(kind: ErrorKind, message: &str, position: Position) -> Error {
        Error {
            kind: kind,
            message: message.into(),
            position: position,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}: {}", self.position, self.kind, self.message)
    }
}

impl error::Error for Error {}
