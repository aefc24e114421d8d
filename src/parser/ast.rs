use std::fmt;

use crate::error::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: Position,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(position: Position, kind: NodeKind) -> Node {
        Node {
            position: position,
            kind: kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnaryOperator::Plus => f.write_str("+"),
            UnaryOperator::Minus => f.write_str("-"),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BinaryOperator::Plus => f.write_str("+"),
            BinaryOperator::Minus => f.write_str("-"),
            BinaryOperator::Multiply => f.write_str("*"),
            BinaryOperator::Divide => f.write_str("/"),
        }
    }
}

/// A variable reference, used both as an operand and as an assignment target.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // 42
    Number(i64),

    // -factor
    UnaryOp(UnaryOperator, Box<Node>),

    // expr + term
    BinaryOp(BinaryOperator, Box<Node>, Box<Node>),

    // x
    Variable(Variable),

    // x := expr
    Assign(Variable, Box<Node>),

    // BEGIN s1; s2 END
    Compound(Vec<Node>),

    // the empty statement
    NoOp,
}
