//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and selected line indicator
//! - [`tree`]: Parse tree with indent guides and the selected node
//! - [`status`]: Status bar with keybindings and selection position
//!
//! Each pane module exports a primary `render_*` function. Panes are
//! stateless apart from the scroll state the app hands them.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tree::render_tree_pane;
