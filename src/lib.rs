//! # Introduction
//!
//! tinyfront is the front end for TINY, a minimal imperative language with
//! integer variables, `if`/`repeat` control flow and `read`/`write` I/O. It
//! turns source text into an abstract syntax tree, or reports the first
//! syntax error it finds.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Reader → Lexer → Parser → AST → Printer / TUI
//! ```
//!
//! 1. [`parser`]: reads lines on demand, scans tokens lazily and builds the
//!    AST by recursive descent.
//! 2. [`tree`]: the depth-first walker and the indented tree printer.
//! 3. [`ui`]: ratatui-based AST browser; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let program = tinyfront::parser::parse("read x; write x * 2").unwrap();
//! assert_eq!(
//!     tinyfront::tree::print_tree(&program),
//!     "[Read][x]\n[Write]\n   [Oper][Times]\n      [ID][x]\n      [Num][2]\n"
//! );
//! ```
//!
//! No type checking, symbol tables or code generation happen here; every
//! expression leaves the parser with an untyped [`parser::ast::ExprType`].

pub mod parser;
pub mod tree;
pub mod ui;
