//! Tree-walking evaluation against a variable store.
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

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use super::{unsupported, VisitResult, Visitor};
use crate::error::{Error, ErrorKind, Position};
use crate::parser::ast::{BinaryOperator, Node, UnaryOperator, Variable};

/// A runtime value.
///
/// Integer arithmetic is checked. Division always produces a `Real`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(v) => v as f64,
            Number::Real(v) => v,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Integer(v) => v == 0,
            Number::Real(v) => v == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Integer(v) => write!(f, "{}", v),
            // Debug keeps the fractional part of whole reals (`5.0`)
            Number::Real(v) => write!(f, "{:?}", v),
        }
    }
}

/// The global variable store, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    values: BTreeMap<String, Number>,
}

impl Store {
    pub fn new() -> Store {
        Store {
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Number> {
        self.values.get(name).cloned()
    }

    /// Binds `name`, replacing any previous value.
    pub fn set(&mut self, name: &str, value: Number) {
        self.values.insert(name.to_owned(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<String, Number> {
        self.values.iter()
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}

fn arithmetic_error(message: &str, position: Position) -> Error {
    Error::new(ErrorKind::Arithmetic, message, position)
}

fn overflow(position: Position) -> Error {
    arithmetic_error("integer overflow", position)
}

/// Reals that left the finite range are rejected like integer overflow.
fn real(value: f64, position: Position) -> VisitResult<Number> {
    if value.is_finite() {
        Ok(Number::Real(value))
    } else {
        Err(arithmetic_error("real overflow", position))
    }
}

fn negate(value: Number, position: Position) -> VisitResult<Number> {
    match value {
        Number::Integer(v) => v
            .checked_neg()
            .map(Number::Integer)
            .ok_or_else(|| overflow(position)),
        Number::Real(v) => Ok(Number::Real(-v)),
    }
}

fn apply(op: BinaryOperator, lhs: Number, rhs: Number, position: Position) -> VisitResult<Number> {
    let (checked, float): (fn(i64, i64) -> Option<i64>, fn(f64, f64) -> f64) = match op {
        BinaryOperator::Plus => (i64::checked_add, |l, r| l + r),
        BinaryOperator::Minus => (i64::checked_sub, |l, r| l - r),
        BinaryOperator::Multiply => (i64::checked_mul, |l, r| l * r),
        BinaryOperator::Divide => {
            if rhs.is_zero() {
                return Err(arithmetic_error("division by zero", position));
            }
            return real(lhs.as_f64() / rhs.as_f64(), position);
        }
    };

    match (lhs, rhs) {
        (Number::Integer(l), Number::Integer(r)) => checked(l, r)
            .map(Number::Integer)
            .ok_or_else(|| overflow(position)),
        _ => real(float(lhs.as_f64(), rhs.as_f64()), position),
    }
}

/// Executes statements and evaluates expressions.
///
/// The store is borrowed for the duration of one pass; the caller keeps
/// ownership and inspects it afterwards.
pub struct Interpreter<'a> {
    store: &'a mut Store,
}

impl<'a> Interpreter<'a> {
    pub fn new(store: &'a mut Store) -> Interpreter<'a> {
        Interpreter { store: store }
    }

    /// Runs a program for its effect on the store.
    pub fn interpret(&mut self, program: &Node) -> VisitResult<()> {
        debug!("Interpreting program");
        self.visit(program)?;
        Ok(())
    }

    /// Evaluates an expression tree to its value.
    pub fn evaluate(&mut self, expr: &Node) -> VisitResult<Number> {
        match self.visit(expr)? {
            Some(value) => Ok(value),
            None => Err(unsupported("expression evaluation", expr)),
        }
    }
}

impl<'a> Visitor for Interpreter<'a> {
    /// Statements have no value.
    type Output = Option<Number>;

    fn visit_number(&mut self, _node: &Node, value: i64) -> VisitResult<Option<Number>> {
        Ok(Some(Number::Integer(value)))
    }

    fn visit_unary_op(
        &mut self,
        node: &Node,
        op: UnaryOperator,
        operand: &Node,
    ) -> VisitResult<Option<Number>> {
        let value = self.evaluate(operand)?;
        match op {
            UnaryOperator::Plus => Ok(Some(value)),
            UnaryOperator::Minus => negate(value, node.position).map(Some),
        }
    }

    fn visit_binary_op(
        &mut self,
        node: &Node,
        op: BinaryOperator,
        lhs: &Node,
        rhs: &Node,
    ) -> VisitResult<Option<Number>> {
        let lhs = self.evaluate(lhs)?;
        let rhs = self.evaluate(rhs)?;
        apply(op, lhs, rhs, node.position).map(Some)
    }

    fn visit_variable(
        &mut self,
        _node: &Node,
        variable: &Variable,
    ) -> VisitResult<Option<Number>> {
        match self.store.get(&variable.name) {
            Some(value) => Ok(Some(value)),
            None => Err(Error::new(
                ErrorKind::Name,
                &format!("Variable '{}' is not defined", variable.name),
                variable.position,
            )),
        }
    }

    fn visit_assign(
        &mut self,
        _node: &Node,
        variable: &Variable,
        expr: &Node,
    ) -> VisitResult<Option<Number>> {
        let value = self.evaluate(expr)?;
        debug!("{} := {}", variable.name, value);
        self.store.set(&variable.name, value);
        Ok(None)
    }

    fn visit_compound(&mut self, _node: &Node, children: &[Node]) -> VisitResult<Option<Number>> {
        for child in children {
            self.visit(child)?;
        }
        Ok(None)
    }

    fn visit_no_op(&mut self, _node: &Node) -> VisitResult<Option<Number>> {
        Ok(None)
    }
}
