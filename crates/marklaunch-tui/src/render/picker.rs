//! Query input and bookmark list.

use crate::app::App;
use crate::colors;
use marklaunch_core::{BookmarkItem, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

/// One list row: `[key] - label - target`.
#[must_use]
pub fn format_row(item: &BookmarkItem) -> String {
    format!("[{}] - {} - {}", item.key, item.label, item.target)
}

/// Render the picker into `area`.
pub fn render_picker(f: &mut Frame, area: Rect, app: &mut App, view: &View<'_>, title: &str) {
    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(Style::default().bg(colors::BG)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .style(Style::default().bg(colors::INPUT_BG))
        .border_style(Style::default().fg(colors::OUTLINE));

    let input_text = if app.input.is_empty() {
        Span::styled(&app.placeholder, Style::default().fg(colors::SUBTEXT))
    } else {
        Span::styled(&app.input, Style::default().fg(colors::ON_SURFACE))
    };
    f.render_widget(Paragraph::new(input_text).block(input_block), chunks[0]);

    let cursor_x = u16::try_from(app.cursor_position).unwrap_or(u16::MAX);
    let max_x = chunks[0].right().saturating_sub(2);
    f.set_cursor_position((
        chunks[0].x.saturating_add(1).saturating_add(cursor_x).min(max_x),
        chunks[0].y + 1,
    ));

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|item| ListItem::new(format_row(item)))
        .collect();

    let count = match view.active {
        Some(active) => format!(" {}/{} ", active + 1, view.rows.len()),
        None => " 0/0 ".to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(count)
                .style(Style::default().bg(colors::BG).fg(colors::ON_SURFACE))
                .border_style(Style::default().fg(colors::OUTLINE)),
        )
        .highlight_style(
            Style::default()
                .bg(colors::SELECTED_BG)
                .fg(colors::ON_SURFACE)
                .add_modifier(Modifier::BOLD),
        );

    app.list_state.select(view.active);
    f.render_stateful_widget(list, chunks[1], &mut app.list_state);
}
