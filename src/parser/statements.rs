//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! stmt_seq    ::= stmt { ';' stmt }
//! stmt        ::= if_stmt | repeat_stmt | assign_stmt | read_stmt | write_stmt
//! if_stmt     ::= 'if' expr 'then' stmt_seq [ 'else' stmt_seq ] 'end'
//! repeat_stmt ::= 'repeat' stmt_seq 'until' expr
//! assign_stmt ::= identifier ':=' expr
//! read_stmt   ::= 'read' identifier
//! write_stmt  ::= 'write' expr
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::reader::SourceReader;
use tracing::trace;

impl<R: SourceReader> Parser<R> {
    /// Parse a statement sequence.
    ///
    /// The sequence ends at exactly the tokens that may follow it in the
    /// grammar: end of file, `else`, `end` and `until`.
    pub(crate) fn parse_stmt_seq(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = vec![self.parse_statement()?];

        while !self.ends_stmt_seq() {
            self.expect_token(TokenKind::Semicolon, "Expected ';' between statements")?;
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    fn ends_stmt_seq(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::EndFile | TokenKind::Else | TokenKind::End | TokenKind::Until
        )
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        trace!(token = %self.current, "Parsing statement");

        match self.current.kind {
            TokenKind::Ident => self.parse_assign_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Write => self.parse_write_statement(),
            TokenKind::Read => self.parse_read_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            _ => Err(self.error(format!(
                "unexpected token in statement: {}",
                self.current
            ))),
        }
    }

    /// Parse if statement: if expr then stmt_seq [else stmt_seq] end
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(TokenKind::If, "Expected 'if'")?.location;

        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::Then, "Expected 'then' after if condition")?;
        let then_branch = self.nested("statement", Self::parse_stmt_seq)?;

        let else_branch = if self.match_token(TokenKind::Else)? {
            Some(self.nested("statement", Self::parse_stmt_seq)?)
        } else {
            None
        };

        self.expect_token(TokenKind::End, "Expected 'end' to close if statement")?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse repeat statement: repeat stmt_seq until expr
    fn parse_repeat_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(TokenKind::Repeat, "Expected 'repeat'")?.location;

        let body = self.nested("statement", Self::parse_stmt_seq)?;
        self.expect_token(TokenKind::Until, "Expected 'until' after repeat body")?;
        let condition = self.parse_expression()?;

        Ok(Stmt::Repeat {
            body,
            condition,
            location: loc,
        })
    }

    /// Parse assignment: identifier := expr
    fn parse_assign_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let name = self.expect_identifier("at start of assignment")?;
        self.expect_token(TokenKind::Assign, "Expected ':=' after assignment target")?;
        let value = self.parse_expression()?;

        Ok(Stmt::Assign {
            name,
            value,
            location: loc,
        })
    }

    fn parse_read_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(TokenKind::Read, "Expected 'read'")?.location;
        let name = self.expect_identifier("after 'read'")?;

        Ok(Stmt::Read {
            name,
            location: loc,
        })
    }

    fn parse_write_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.expect_token(TokenKind::Write, "Expected 'write'")?.location;
        let value = self.parse_expression()?;

        Ok(Stmt::Write {
            value,
            location: loc,
        })
    }
}
