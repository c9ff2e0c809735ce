//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token-matching helpers, and the entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statement sequences and the five statement forms
//! - `expressions`: comparison, additive, multiplicative and power levels
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser holds exactly one lookahead token and pulls the next one from
//! the [`Lexer`] only when the current one is consumed. The first error ends
//! the parse; no partial tree is returned.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::reader::{LineReader, SourceReader};
use std::io;
use thiserror::Error;
use tracing::trace;

/// Parser error type
#[derive(Debug, Error)]
pub enum ParseError {
    /// The scanner produced an error token.
    #[error("Lexical error at line {}, column {}: unrecognized character '{character}'", .location.line, .location.column)]
    Lexical {
        character: String,
        location: SourceLocation,
    },

    /// The lookahead does not fit the grammar at this point.
    #[error("Syntax error at line {}, column {}: {message}", .location.line, .location.column)]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    /// Tokens remain after the top-level statement sequence.
    #[error("Trailing input at line {}, column {}: {found} after program end", .location.line, .location.column)]
    TrailingInput {
        found: String,
        location: SourceLocation,
    },

    #[error("I/O error while reading source: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Lexical { location, .. }
            | ParseError::Syntax { location, .. }
            | ParseError::TrailingInput { location, .. } => Some(*location),
            ParseError::Io(_) => None,
        }
    }
}

/// Deepest nesting of parenthesised expressions, `^` operands and
/// `if`/`repeat` bodies the parser accepts.
pub const MAX_NESTING: usize = 128;

/// Parse a complete TINY program from a string.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}

/// Recursive descent parser for TINY
pub struct Parser<R> {
    pub(crate) lexer: Lexer<R>,
    pub(crate) current: Token,
    depth: usize,
}

impl<'a> Parser<LineReader<&'a [u8]>> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        Self::from_reader(LineReader::from_source(source))
    }
}

impl<R: SourceReader> Parser<R> {
    /// Create a parser over any line reader and prime the lookahead.
    pub fn from_reader(reader: R) -> Result<Self, ParseError> {
        let mut lexer = Lexer::from_reader(reader);
        let current = lexer.next_token()?;
        let parser = Self {
            lexer,
            current,
            depth: 0,
        };
        parser.check_lexical()?;
        Ok(parser)
    }

    /// Parse the entire program: a statement sequence followed by end of file.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let statements = self.parse_stmt_seq()?;

        if !self.is_at_end() {
            return Err(ParseError::TrailingInput {
                found: self.current.to_string(),
                location: self.current_location(),
            });
        }

        trace!(statements = statements.len(), "Parsed program");
        Ok(Program::new(statements))
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume the lookahead and fetch the next token, returning the consumed one.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let previous = std::mem::replace(&mut self.current, next);
        self.check_lexical()?;
        Ok(previous)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::EndFile)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(format!("{}, found {}", message, self.current)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        let token = self.expect_token(TokenKind::Ident, &format!("Expected identifier {ctx}"))?;
        Ok(token.lexeme)
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError::Syntax {
            message,
            location: self.current_location(),
        }
    }

    /// Run `inner` one nesting level deeper, failing past [`MAX_NESTING`].
    pub(crate) fn nested<T>(
        &mut self,
        what: &str,
        inner: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(format!("{what} nested too deeply")));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    fn check_lexical(&self) -> Result<(), ParseError> {
        if self.check(TokenKind::Error) {
            return Err(ParseError::Lexical {
                character: self.current.lexeme.clone(),
                location: self.current_location(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_program() {
        let program = parse("read x; write x").unwrap();

        assert_eq!(program.statements.len(), 2);
        assert!(matches!(&program.statements[0], Stmt::Read { name, .. } if name == "x"));
        assert!(matches!(&program.statements[1], Stmt::Write { .. }));
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("x := 1 end").unwrap_err();
        match err {
            ParseError::TrailingInput { found, location } => {
                assert_eq!(found, "'end'");
                assert_eq!(location, SourceLocation::new(1, 8));
            }
            other => panic!("Expected trailing input error, got {other:?}"),
        }
    }

    #[test]
    fn test_lexical_error_stops_parse() {
        let err = parse("x := 1 $ 2").unwrap_err();
        assert!(matches!(err, ParseError::Lexical { ref character, .. } if character == "$"));
    }

    #[test]
    fn test_lexical_error_on_first_token() {
        assert!(matches!(Parser::new("@"), Err(ParseError::Lexical { .. })));
    }

    #[test]
    fn test_error_messages() {
        let err = parse("x := 1 end").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Trailing input at line 1, column 8: 'end' after program end"
        );
        assert_eq!(err.location(), Some(SourceLocation::new(1, 8)));
    }

    #[test]
    fn test_lookahead_is_lazy() {
        // Only the first token has been scanned after construction.
        let parser = Parser::new("read x; write x").unwrap();
        assert!(parser.check(TokenKind::Read));
        assert_eq!(parser.current_location(), SourceLocation::new(1, 1));
    }
}
