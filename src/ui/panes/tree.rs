//! Parse tree pane rendering

use crate::parser::ast::NodeKind;
use crate::tree::print::{TreeLine, INDENT};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn kind_color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::If | NodeKind::Repeat | NodeKind::Assign | NodeKind::Read | NodeKind::Write => {
            DEFAULT_THEME.keyword
        }
        NodeKind::Operator => DEFAULT_THEME.operator,
        NodeKind::Number => DEFAULT_THEME.number,
        NodeKind::Identifier => DEFAULT_THEME.identifier,
    }
}

/// Build the styled row for one node: indent guides, kind tag, payload.
fn tree_row(line: &TreeLine) -> Line<'static> {
    let mut spans = Vec::new();
    for _ in 0..line.depth {
        spans.push(Span::styled(
            format!("{:<width$}", "│", width = INDENT),
            Style::default().fg(DEFAULT_THEME.guide),
        ));
    }

    // The label is `[Kind]` followed by optional payload brackets
    let split = line.label.find(']').map_or(line.label.len(), |i| i + 1);
    let (kind, payload) = line.label.split_at(split);
    spans.push(Span::styled(
        kind.to_string(),
        Style::default()
            .fg(kind_color(line.kind))
            .add_modifier(Modifier::BOLD),
    ));
    if !payload.is_empty() {
        spans.push(Span::styled(
            payload.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }

    Line::from(spans)
}

/// Clamp `scroll_offset` so that `selected` stays inside a window of
/// `visible_height` rows over `total` items.
pub(crate) fn follow_selection(
    scroll_offset: usize,
    selected: usize,
    visible_height: usize,
    total: usize,
) -> usize {
    let mut offset = scroll_offset;
    if selected < offset {
        offset = selected;
    } else if selected >= offset + visible_height {
        offset = selected + 1 - visible_height;
    }
    offset.min(total.saturating_sub(visible_height))
}

/// Render the parse tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[TreeLine],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Parse Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if lines.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = follow_selection(*scroll_offset, selected, visible_height, lines.len());

    let items: Vec<ListItem> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let item = ListItem::new(tree_row(line));
            if idx == selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    #[test]
    fn test_follow_selection() {
        // Already visible
        assert_eq!(follow_selection(0, 3, 10, 50), 0);
        // Below the window
        assert_eq!(follow_selection(0, 12, 10, 50), 3);
        // Above the window
        assert_eq!(follow_selection(20, 5, 10, 50), 5);
        // Short list never scrolls
        assert_eq!(follow_selection(4, 2, 10, 6), 0);
    }

    #[test]
    fn test_tree_row_splits_kind_and_payload() {
        let line = TreeLine {
            depth: 2,
            kind: NodeKind::Operator,
            label: "[Oper][Plus]".to_string(),
            location: SourceLocation::new(1, 1),
        };
        let row = tree_row(&line);
        let texts: Vec<&str> = row.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["│  ", "│  ", "[Oper]", "[Plus]"]);
    }
}
