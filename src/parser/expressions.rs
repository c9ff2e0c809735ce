//! Expression parsing implementation
//!
//! Precedence is encoded by the shape of the recursion rather than a table:
//!
//! ```text
//! expr      ::= math_expr [ ('<' | '=') math_expr ]   at most one comparison
//! math_expr ::= term { ('+' | '-') term }             left-associative
//! term      ::= factor { ('*' | '/') factor }         left-associative
//! factor    ::= atom [ '^' factor ]                   right-associative
//! atom      ::= '(' math_expr ')' | number | identifier
//! ```
//!
//! Left-associative levels fold iteratively, so each new operator node takes
//! the tree built so far as its left operand. `^` recurses on its right
//! operand instead, so `a^b^c` groups as `a^(b^c)`. Parentheses and `^`
//! both count against the parser's nesting bound. An operator node takes the
//! location of its left operand.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::reader::SourceReader;

impl<R: SourceReader> Parser<R> {
    /// Parse expression: an arithmetic expression with an optional comparison
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_math_expr()?;

        let op = match self.current.kind {
            TokenKind::LessThan => BinOp::LessThan,
            TokenKind::Equal => BinOp::Equal,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.parse_math_expr()?;

        Ok(Expr::binary(op, left, right))
    }

    /// Parse additive expression (+, -)
    pub(crate) fn parse_math_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinOp::Plus,
                TokenKind::Minus => BinOp::Minus,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative expression (*, /)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Times => BinOp::Times,
                TokenKind::Divide => BinOp::Divide,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_factor()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse exponentiation (^), right-associative
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;

        if self.check(TokenKind::Power) {
            return self.nested("expression", |p| {
                p.advance()?;
                let exponent = p.parse_factor()?;
                Ok(Expr::binary(BinOp::Power, base, exponent))
            });
        }

        Ok(base)
    }

    /// Parse atom: number, identifier, or parenthesized expression
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::Num => {
                let token = self.advance()?;
                let value = token.lexeme.parse::<i64>().map_err(|_| ParseError::Syntax {
                    message: format!("integer literal out of range: {}", token.lexeme),
                    location: token.location,
                })?;
                Ok(Expr::new(ExprKind::Number(value), token.location))
            }
            TokenKind::Ident => {
                let token = self.advance()?;
                Ok(Expr::new(ExprKind::Identifier(token.lexeme), token.location))
            }
            TokenKind::LeftParen => self.nested("expression", |p| {
                p.advance()?;
                let expr = p.parse_math_expr()?;
                p.expect_token(TokenKind::RightParen, "Expected ')' after expression")?;
                Ok(expr)
            }),
            _ => Err(self.error(format!(
                "unexpected token in primary expression: {}",
                self.current
            ))),
        }
    }
}
