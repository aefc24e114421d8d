//! Tree walkers over the syntax tree.
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

pub mod interpreter;
pub mod lisp;
pub mod rpn;

use crate::error::{Error, ErrorKind};
use crate::parser::ast::{BinaryOperator, Node, NodeKind, UnaryOperator, Variable};

pub use self::interpreter::{Interpreter, Number, Store};
pub use self::lisp::LispTranslator;
pub use self::rpn::RpnTranslator;

pub type VisitResult<T> = ::std::result::Result<T, Error>;

/// One handler per node kind.
///
/// `visit` dispatches on the node kind, so an implementation has to say
/// what it does for every kind, even if that is to reject it.
pub trait Visitor {
    type Output;

    fn visit_number(&mut self, node: &Node, value: i64) -> VisitResult<Self::Output>;

    fn visit_unary_op(
        &mut self,
        node: &Node,
        op: UnaryOperator,
        operand: &Node,
    ) -> VisitResult<Self::Output>;

    fn visit_binary_op(
        &mut self,
        node: &Node,
        op: BinaryOperator,
        lhs: &Node,
        rhs: &Node,
    ) -> VisitResult<Self::Output>;

    fn visit_variable(&mut self, node: &Node, variable: &Variable) -> VisitResult<Self::Output>;

    fn visit_assign(
        &mut self,
        node: &Node,
        variable: &Variable,
        expr: &Node,
    ) -> VisitResult<Self::Output>;

    fn visit_compound(&mut self, node: &Node, children: &[Node]) -> VisitResult<Self::Output>;

    fn visit_no_op(&mut self, node: &Node) -> VisitResult<Self::Output>;

    fn visit(&mut self, node: &Node) -> VisitResult<Self::Output> {
        match node.kind {
            NodeKind::Number(value) => self.visit_number(node, value),
            NodeKind::UnaryOp(op, ref operand) => self.visit_unary_op(node, op, operand),
            NodeKind::BinaryOp(op, ref lhs, ref rhs) => self.visit_binary_op(node, op, lhs, rhs),
            NodeKind::Variable(ref variable) => self.visit_variable(node, variable),
            NodeKind::Assign(ref variable, ref expr) => self.visit_assign(node, variable, expr),
            NodeKind::Compound(ref children) => self.visit_compound(node, children),
            NodeKind::NoOp => self.visit_no_op(node),
        }
    }
}

/// Short name of a node kind, for messages.
pub fn kind_name(node: &Node) -> &'static str {
    match node.kind {
        NodeKind::Number(_) => "number",
        NodeKind::UnaryOp(..) => "unary operation",
        NodeKind::BinaryOp(..) => "binary operation",
        NodeKind::Variable(_) => "variable",
        NodeKind::Assign(..) => "assignment",
        NodeKind::Compound(_) => "compound statement",
        NodeKind::NoOp => "empty statement",
    }
}

/// Error for a walker that does not handle this kind of node.
pub fn unsupported(walker: &str, node: &Node) -> Error {
    Error::new(
        ErrorKind::UnsupportedNode,
        &format!("{} cannot handle a {}", walker, kind_name(node)),
        node.position,
    )
}
