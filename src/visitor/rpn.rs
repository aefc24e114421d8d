//! Reverse Polish rendering of arithmetic expressions.
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

const NAME: &str = "RPN translator";

/// Renders `3 * (4 + 5)` as `3 4 5 + *`.
///
/// Only numbers and binary operations are supported.
#[derive(Debug, Default)]
pub struct RpnTranslator;

impl RpnTranslator {
    pub fn new() -> RpnTranslator {
        RpnTranslator
    }

    pub fn translate(&mut self, expr: &Node) -> VisitResult<String> {
        self.visit(expr)
    }
}

impl Visitor for RpnTranslator {
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
        Ok(format!("{} {} {}", lhs, rhs, op))
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

    fn rpn(input: &str) -> VisitResult<String> {
        let expr = Parser::new(Lexer::new(input))?.parse_expression()?;
        RpnTranslator::new().translate(&expr)
    }

    #[test]
    fn test_simple() {
        assert_eq!(rpn("3 + 4").unwrap(), "3 4 +");
        assert_eq!(rpn("3 * (4 + 5)").unwrap(), "3 4 5 + *");
    }

    #[test]
    fn test_nested() {
        assert_eq!(rpn("37 * (7 + 13)").unwrap(), "37 7 13 + *");
        assert_eq!(rpn("5 + ((1 + 2) * 4) - 3").unwrap(), "5 1 2 + 4 * + 3 -");
        assert_eq!(rpn("(5 + 3) * 12 / 3").unwrap(), "5 3 + 12 * 3 /");
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(rpn("-3").unwrap_err().kind, ErrorKind::UnsupportedNode);
        assert_eq!(rpn("2 * x").unwrap_err().kind, ErrorKind::UnsupportedNode);
    }

    #[test]
    fn test_statement_tree() {
        let program = Parser::new(Lexer::new("BEGIN x := 1 END."))
            .unwrap()
            .parse_program()
            .unwrap();
        let err = RpnTranslator::new().translate(&program).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedNode);
        assert_eq!(err.message, "RPN translator cannot handle a compound statement");
    }
}
