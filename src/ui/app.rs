//! Main TUI application state and logic

use crate::parser::ast::Program;
use crate::tree::{tree_lines, TreeLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::panes::{render_source_pane, render_status_bar, render_tree_pane, SourceScrollState};

/// Rows moved by PageUp / PageDown
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Rendered parse tree, one entry per node in walk order
    pub lines: Vec<TreeLine>,

    /// The source code that was parsed
    pub source_code: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `lines` of the selected node
    pub selected: usize,

    pub tree_scroll: usize,
    pub source_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for a successfully parsed program
    pub fn new(program: &Program, source_code: String) -> Self {
        let lines = tree_lines(program);
        let status_message = format!("Parsed {} statement(s)", program.statements.len());
        App {
            lines,
            source_code,
            focused_pane: FocusedPane::Tree,
            selected: 0,
            tree_scroll: 0,
            source_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Source line of the selected node, 0 when there is none
    pub fn current_line(&self) -> usize {
        self.lines
            .get(self.selected)
            .map_or(0, |line| line.location.line)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source (left) | Tree (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let current_line = self.current_line();

        render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_tree_pane(
            frame,
            columns[1],
            &self.lines,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.lines.len(),
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.toggle();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select_previous(1),
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select_next(1),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
            },
            KeyCode::PageUp => self.select_previous(PAGE),
            KeyCode::PageDown => self.select_next(PAGE),
            KeyCode::Home => {
                self.selected = 0;
                self.update_status();
            }
            KeyCode::End => {
                self.selected = self.lines.len().saturating_sub(1);
                self.update_status();
            }
            _ => {}
        }
    }

    fn select_previous(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.update_status();
    }

    fn select_next(&mut self, n: usize) {
        let last = self.lines.len().saturating_sub(1);
        self.selected = (self.selected + n).min(last);
        self.update_status();
    }

    fn update_status(&mut self) {
        if let Some(line) = self.lines.get(self.selected) {
            self.status_message = format!("{} at {}", line.label, line.location);
        }
    }
}
