//! Lisp-style prefix rendering of arithmetic expressions.
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

use super::{unsupported, VisitResult, Visitor};
use crate::parser::ast::{BinaryOperator, Node, UnaryOperator, Variable};

const NAME: &str = "Lisp translator";

/// Renders `3 * (4 + 5)` as `(* 3 (+ 4 5))`.
#[derive(Debug, Default)]
pub struct LispTranslator;

impl LispTranslator {
    pub fn new() -> LispTranslator {
        LispTranslator
    }

    pub fn translate(&mut self, expr: &Node) -> VisitResult<String> {
        self.visit(expr)
    }
}

impl Visitor for LispTranslator {
    type Output = String;

    fn visit_number(&mut self, _node: &Node, value: i64) -> VisitResult<String> {
        Ok(value.to_string())
    }

    fn visit_unary_op(&mut self, node: &Node, _: UnaryOperator, _: &Node) -> VisitResult<String> {
        Err(unsupported(NAME, node))
    }

    fn visit_binary_op(
        &mut self,
        _node: &Node,
        op: BinaryOperator,
        lhs: &Node,
        rhs: &Node,
    ) -> VisitResult<String> {
        let lhs = self.visit(lhs)?;
        let rhs = self.visit(rhs)?;
        Ok(format!("({} {} {})", op, lhs, rhs))
    }

    fn visit_variable(&mut self, node: &Node, _: &Variable) -> VisitResult<String> {
        Err(unsupported(NAME, node))
    }

    fn visit_assign(&mut self, node: &Node, _: &Variable, _: &Node) -> VisitResult<String> {
        Err(unsupported(NAME, node))
    }

    fn visit_compound(&mut self, node: &Node, _: &[Node]) -> VisitResult<String> {
        Err(unsupported(NAME, node))
    }

    fn visit_no_op(&mut self, node: &Node) -> VisitResult<String> {
        Err(unsupported(NAME, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::visitor::RpnTranslator;

    fn lisp(input: &str) -> VisitResult<String> {
        let expr = Parser::new(Lexer::new(input))?.parse_expression()?;
        LispTranslator::new().translate(&expr)
    }

    #[test]
    fn test_translate() {
        assert_eq!(lisp("3 * (4 + 5)").unwrap(), "(* 3 (+ 4 5))");
        assert_eq!(
            lisp("(13 + 37) / (3 * (3 + (2 * 5)))").unwrap(),
            "(/ (+ 13 37) (* 3 (+ 3 (* 2 5))))"
        );
        assert_eq!(lisp("7 + 5 * 2 - 3").unwrap(), "(- (+ 7 (* 5 2)) 3)");
    }

    #[test]
    fn test_single_number() {
        assert_eq!(lisp("42").unwrap(), "42");
    }

    #[test]
    fn test_unsupported() {
        let err = lisp("1 + -2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedNode);
        assert_eq!(err.message, "Lisp translator cannot handle a unary operation");
    }

    #[test]
    fn test_shared_tree() {
        let expr = Parser::new(Lexer::new("3 * (4 + 5)"))
            .unwrap()
            .parse_expression()
            .unwrap();
        assert_eq!(RpnTranslator::new().translate(&expr).unwrap(), "3 4 5 + *");
        assert_eq!(LispTranslator::new().translate(&expr).unwrap(), "(* 3 (+ 4 5))");
    }
}
