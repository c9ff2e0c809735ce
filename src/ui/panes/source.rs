//! Source code pane rendering with syntax highlighting
//!
//! Displays the TINY program with line numbers and highlights the line of
//! the node selected in the tree pane.
//!
//! # Rendering
//!
//! Highlighting runs a small character scanner per line instead of the real
//! lexer so that it never fails on malformed text. `{ ... }` comments are
//! tracked across lines.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one source line. `in_comment` carries an open `{` comment from
/// the previous line and is updated for the next one.
pub(crate) fn highlight_source_code(line: &str, in_comment: &mut bool) -> Line<'static> {
    let comment_style = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let chars: Vec<char> = line.trim_end_matches(['\n', '\r']).chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if *in_comment || chars[i] == '{' {
            let start = i;
            *in_comment = true;
            while i < chars.len() {
                i += 1;
                if chars[i - 1] == '}' {
                    *in_comment = false;
                    break;
                }
            }
            spans.push(Span::styled(chars[start..i].iter().collect::<String>(), comment_style));
            continue;
        }

        let c = chars[i];
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let style = get_keyword_style(&word);
            spans.push(Span::styled(word, style));
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            spans.push(Span::styled(
                chars[start..i].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.number),
            ));
            continue;
        }

        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary), // Brackets
            ':' | '=' | '<' | '+' | '-' | '*' | '/' | '^' => {
                Style::default().fg(DEFAULT_THEME.operator)
            }
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
        i += 1;
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str) -> Style {
    match word {
        "if" | "then" | "else" | "end" | "repeat" | "until" | "read" | "write" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg), // Variables
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: usize,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();

    // Account for borders (2), min 1
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    // Comment state has to be carried from the top of the file
    let mut in_comment = false;
    let highlighted: Vec<Line> = lines
        .iter()
        .map(|line| highlight_source_code(line, &mut in_comment))
        .collect();

    let visible_lines: Vec<Line> = highlighted
        .into_iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
