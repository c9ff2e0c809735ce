//! Consumers of the finished AST.
//!
//! - [`walk`]: the depth-first traversal shared by every consumer
//! - [`print`]: indented text rendering used by the CLI and the browser

pub mod print;
pub mod walk;

pub use print::{print_tree, tree_lines, TreeLine};
pub use walk::{walk_program, NodeRef};
