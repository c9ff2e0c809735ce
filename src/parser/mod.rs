//! TINY source code parser
//!
//! This module transforms TINY source text into an Abstract Syntax Tree (AST):
//! - [`reader`]: Line-at-a-time source input
//! - [`lexer`]: Tokenization (source lines → tokens, on demand)
//! - [`parse`]: Parser state, errors and entry points (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # The TINY language
//!
//! - Statements: `if/then/else/end`, `repeat/until`, `:=`, `read`, `write`,
//!   separated by `;`
//! - Expressions: integers and variables with `+ - * / ^`, plus a single
//!   `<` or `=` comparison
//! - Comments: `{ ... }`, possibly spanning lines
//! - No declarations; every variable is an integer
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar production,
//! with a single token of lookahead and no backtracking.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod reader;
mod statements;

pub use parse::{parse, ParseError, Parser, MAX_NESTING};
