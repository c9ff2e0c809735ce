//! Terminal AST browser built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, node selection
//! - **[`panes`]**: render functions for each visible pane (source, tree, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a parsed
//! [`Program`] and call [`App::run`] to start the event loop. The browser is
//! only ever opened on a successful parse.
//!
//! [`Program`]: crate::parser::ast::Program
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
