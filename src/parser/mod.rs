//! Syntax analysis.
//! Builds an abstract syntax tree by pulling tokens from the lexer.
// Copyright (c) Alexander Koch 2017
use crate::error::{Error, ErrorKind, Position};
use crate::lexer::{Keyword, Lexer, Token, TokenType, TokenValue};

pub mod ast;
pub type ParsingResult<T> = ::std::result::Result<T, Error>;

/// Deepest tree the parser will build. Unary operators, parentheses,
/// blocks and every link of an operator chain each count one level.
pub const MAX_DEPTH: usize = 512;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser and reads the first token from the lexer.
    pub fn new(mut lexer: Lexer<'a>) -> ParsingResult<Parser<'a>> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer: lexer,
            current: current,
            depth: 0,
        })
    }

    /// Generates an error object at the current token.
    ///
    /// # Arguments
    /// * `message` - Error message do display
    fn err(&self, message: &str) -> Error {
        Error::new(ErrorKind::Syntax, message, self.current.position)
    }

    /// 'Bumps' the parser to read the next token.
    fn bump(&mut self) -> ParsingResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect_type(&mut self, t: TokenType) -> ParsingResult<()> {
        if self.current.typ == t {
            self.bump()
        } else {
            let msg = format!("Unexpected token `{:?}`, expected: `{:?}`",
                              self.current.typ,
                              t);
            Err(self.err(msg.as_str()))
        }
    }

    /// Enters one more level of nesting.
    fn descend(&mut self, what: &str) -> ParsingResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(self.err(&format!("{} nested too deeply", what)))
        } else {
            Ok(())
        }
    }

    fn expect_eof(&mut self) -> ParsingResult<()> {
        if self.current.typ == TokenType::Eof {
            Ok(())
        } else {
            let msg = format!("Unexpected trailing token `{:?}`", self.current.typ);
            Err(self.err(msg.as_str()))
        }
    }

    /// Parses a whole program and requires the input to end after the final dot.
    pub fn parse_program(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: program");
        let node = self.parse_compound_statement()?;
        self.expect_type(TokenType::Dot)?;
        self.expect_eof()?;
        Ok(node)
    }

    /// Parses a single arithmetic expression spanning the whole input.
    pub fn parse_expression(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: expression");
        let node = self.parse_expr()?;
        self.expect_eof()?;
        Ok(node)
    }

    fn parse_compound_statement(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: compound statement");
        let position = self.current.position;
        self.descend("block")?;
        self.expect_type(TokenType::Keyword(Keyword::Begin))?;
        let children = self.parse_statement_list()?;
        self.expect_type(TokenType::Keyword(Keyword::End))?;
        self.depth -= 1;

        Ok(ast::Node::new(position, ast::NodeKind::Compound(children)))
    }

    fn parse_statement_list(&mut self) -> ParsingResult<Vec<ast::Node>> {
        trace!("Parsing: statement list");
        let mut statements = vec![self.parse_statement()?];
        while self.current.typ == TokenType::Semicolon {
            self.bump()?;
            statements.push(self.parse_statement()?);
        }

        // Two statements without a separator in between
        if self.current.typ == TokenType::Identifier {
            return Err(self.err("Unexpected identifier, expected `;` or `END`"));
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: statement");
        match self.current.typ {
            TokenType::Keyword(Keyword::Begin) => self.parse_compound_statement(),
            TokenType::Identifier => self.parse_assignment(),
            _ => Ok(ast::Node::new(self.current.position, ast::NodeKind::NoOp)),
        }
    }

    fn parse_assignment(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: assignment");
        let position = self.current.position;
        let variable = self.parse_variable()?;
        self.expect_type(TokenType::Assign)?;
        let expr = self.parse_expr()?;

        Ok(ast::Node::new(position, ast::NodeKind::Assign(variable, Box::new(expr))))
    }

    fn parse_variable(&mut self) -> ParsingResult<ast::Variable> {
        let position = self.current.position;
        let name = match self.current.value {
            Some(TokenValue::Name(ref s)) if self.current.typ == TokenType::Identifier => s.clone(),
            _ => {
                let msg = format!("Unexpected token `{:?}`, expected: `{:?}`",
                                  self.current.typ,
                                  TokenType::Identifier);
                return Err(self.err(msg.as_str()));
            }
        };
        self.bump()?;

        Ok(ast::Variable {
            name: name,
            position: position,
        })
    }

    fn parse_expr(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: expr");
        let base = self.depth;
        let mut node = self.parse_term()?;
        loop {
            let operator = match self.current.typ {
                TokenType::Plus => ast::BinaryOperator::Plus,
                TokenType::Minus => ast::BinaryOperator::Minus,
                _ => {
                    self.depth = base;
                    return Ok(node);
                }
            };
            let position = self.current.position;
            self.descend("expression")?;
            self.bump()?;
            let rhs = self.parse_term()?;
            node = ast::Node::new(
                position,
                ast::NodeKind::BinaryOp(operator, Box::new(node), Box::new(rhs)),
            );
        }
    }

    fn parse_term(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: term");
        let base = self.depth;
        let mut node = self.parse_factor()?;
        loop {
            let operator = match self.current.typ {
                TokenType::Multiply => ast::BinaryOperator::Multiply,
                TokenType::Divide => ast::BinaryOperator::Divide,
                _ => {
                    self.depth = base;
                    return Ok(node);
                }
            };
            let position = self.current.position;
            self.descend("expression")?;
            self.bump()?;
            let rhs = self.parse_factor()?;
            node = ast::Node::new(
                position,
                ast::NodeKind::BinaryOp(operator, Box::new(node), Box::new(rhs)),
            );
        }
    }

    fn parse_factor(&mut self) -> ParsingResult<ast::Node> {
        trace!("Parsing: factor");
        let position = self.current.position;
        match self.current.typ {
            TokenType::Plus | TokenType::Minus => {
                let operator = if self.current.typ == TokenType::Plus {
                    ast::UnaryOperator::Plus
                } else {
                    ast::UnaryOperator::Minus
                };
                self.descend("expression")?;
                self.bump()?;
                let operand = self.parse_factor()?;
                self.depth -= 1;
                Ok(ast::Node::new(position, ast::NodeKind::UnaryOp(operator, Box::new(operand))))
            }
            TokenType::Integer => {
                let value = match self.current.value {
                    Some(TokenValue::Integer(v)) => v,
                    _ => return Err(self.err("Integer token without a value")),
                };
                self.bump()?;
                Ok(ast::Node::new(position, ast::NodeKind::Number(value)))
            }
            TokenType::LParen => {
                self.descend("expression")?;
                self.bump()?;
                let node = self.parse_expr()?;
                self.expect_type(TokenType::RParen)?;
                self.depth -= 1;
                Ok(node)
            }
            TokenType::Identifier => {
                let variable = self.parse_variable()?;
                Ok(ast::Node::new(position, ast::NodeKind::Variable(variable)))
            }
            _ => {
                let msg = format!("Unexpected token `{:?}`, expected an expression",
                                  self.current.typ);
                Err(self.err(msg.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ast::NodeKind::*;
    use super::ast::{BinaryOperator, Node, UnaryOperator};
    use super::*;
    use pretty_assertions::assert_eq;

    fn n(kind: ast::NodeKind) -> Node {
        Node::new(Position::new(0, 0), kind)
    }

    fn num(v: i64) -> Box<Node> {
        Box::new(n(Number(v)))
    }

    fn var(name: &str) -> ast::Variable {
        ast::Variable {
            name: name.into(),
            position: Position::new(0, 0),
        }
    }

    /// Position-free shorthand for comparing trees in tests.
    fn strip(node: &ast::Node) -> ast::Node {
        let kind = match node.kind {
            Number(v) => Number(v),
            UnaryOp(op, ref e) => UnaryOp(op, Box::new(strip(e))),
            BinaryOp(op, ref l, ref r) => BinaryOp(op, Box::new(strip(l)), Box::new(strip(r))),
            Variable(ref v) => Variable(ast::Variable {
                name: v.name.clone(),
                position: Position::new(0, 0),
            }),
            Assign(ref v, ref e) => Assign(
                ast::Variable {
                    name: v.name.clone(),
                    position: Position::new(0, 0),
                },
                Box::new(strip(e)),
            ),
            Compound(ref children) => Compound(children.iter().map(strip).collect()),
            NoOp => NoOp,
        };
        ast::Node::new(Position::new(0, 0), kind)
    }

    fn program(input: &str) -> ParsingResult<Node> {
        Parser::new(Lexer::new(input))?.parse_program()
    }

    fn expression(input: &str) -> ParsingResult<Node> {
        Parser::new(Lexer::new(input))?.parse_expression()
    }

    #[test]
    fn test_precedence() {
        let node = expression("1 + 2 * 3").unwrap();
        assert_eq!(
            strip(&node),
            n(BinaryOp(
                BinaryOperator::Plus,
                num(1),
                Box::new(n(BinaryOp(BinaryOperator::Multiply, num(2), num(3))))
            ))
        );
    }

    #[test]
    fn test_left_associative() {
        let node = expression("8 - 4 - 2").unwrap();
        assert_eq!(
            strip(&node),
            n(BinaryOp(
                BinaryOperator::Minus,
                Box::new(n(BinaryOp(BinaryOperator::Minus, num(8), num(4)))),
                num(2)
            ))
        );
    }

    #[test]
    fn test_parentheses() {
        let node = expression("(1 + 2) * 3").unwrap();
        assert_eq!(
            strip(&node),
            n(BinaryOp(
                BinaryOperator::Multiply,
                Box::new(n(BinaryOp(BinaryOperator::Plus, num(1), num(2)))),
                num(3)
            ))
        );
    }

    #[test]
    fn test_unary_chain() {
        let node = expression("-+-5").unwrap();
        assert_eq!(
            strip(&node),
            n(UnaryOp(
                UnaryOperator::Minus,
                Box::new(n(UnaryOp(
                    UnaryOperator::Plus,
                    Box::new(n(UnaryOp(UnaryOperator::Minus, num(5))))
                )))
            ))
        );
    }

    #[test]
    fn test_program() {
        let node = program("BEGIN x := 2; BEGIN y := x END; END.").unwrap();
        assert_eq!(
            strip(&node),
            n(Compound(vec![
                n(Assign(var("x"), num(2))),
                n(Compound(vec![n(Assign(var("y"), Box::new(n(Variable(var("x"))))))])),
                n(NoOp),
            ]))
        );
    }

    #[test]
    fn test_empty_program() {
        let node = program("BEGIN END.").unwrap();
        assert_eq!(strip(&node), n(Compound(vec![n(NoOp)])));
    }

    #[test]
    fn test_positions() {
        let node = program("BEGIN\n  x := 1\nEND.").unwrap();
        assert_eq!(node.position, Position::new(1, 1));
        match node.kind {
            Compound(ref children) => {
                assert_eq!(children[0].position, Position::new(2, 3));
            }
            _ => panic!("expected a compound statement"),
        }
    }

    #[test]
    fn test_missing_expression() {
        let err = program("BEGIN x := END.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.position, Position::new(1, 12));
    }

    #[test]
    fn test_missing_dot() {
        let err = program("BEGIN x := 1 END").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_trailing_input() {
        let err = program("BEGIN END. x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.position, Position::new(1, 12));
    }

    #[test]
    fn test_dangling_identifier() {
        let err = program("BEGIN x := 1 y := 2 END.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.position, Position::new(1, 14));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = expression("(1 + 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_expression_trailing_input() {
        let err = expression("1 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_lexical_error_propagates() {
        let err = program("BEGIN x := 1 % 2 END.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
    }

    #[test]
    fn test_deep_unary_chain() {
        let input = format!("{}1", "-".repeat(100_000));
        let err = expression(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn test_deep_parentheses() {
        let input = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
        assert_eq!(expression(&input).unwrap_err().kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_long_operator_chain() {
        let input = vec!["1"; 100_000].join(" + ");
        assert_eq!(expression(&input).unwrap_err().kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_deep_blocks() {
        let input = format!("{}{}.", "BEGIN ".repeat(10_000), "END ".repeat(10_000));
        let err = program(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.message, "block nested too deeply");
    }

    #[test]
    fn test_nesting_within_limit() {
        let depth = MAX_DEPTH / 2;
        let input = format!("{}{}1{}", "-".repeat(depth), "(".repeat(depth - 1), ")".repeat(depth - 1));
        assert!(expression(&input).is_ok());

        let chain = vec!["2"; MAX_DEPTH].join(" * ");
        assert!(expression(&chain).is_ok());

        // Depth is released once a nested part is closed
        let siblings = vec![format!("{}1", "-".repeat(MAX_DEPTH - 1)); 4].join(" ; x := ");
        assert!(program(&format!("BEGIN x := {} END.", siblings)).is_ok());
    }
}
