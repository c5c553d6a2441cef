use engine::SortColumn;
use ratatui::{
    Frame,
    layout::{Constraint, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, TableState,
    },
};

use crate::{
    app::{AppState, Focus},
    ui::{components::money::styled_amount, theme::Theme},
};

pub fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let header = Row::new(SortColumn::ALL.iter().enumerate().map(|(idx, column)| {
        let mut label = format!("{} {}", idx + 1, column.label());
        if let Some((sorted, direction)) = state.sorted_by
            && sorted == *column
        {
            label.push(' ');
            label.push_str(direction.arrow());
        }
        Cell::from(label)
    }))
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.rows.iter().map(|entry| {
        Row::new(vec![
            Cell::from(entry.category.clone()),
            Cell::from(entry.date_label()),
            Cell::from(styled_amount(entry.amount, theme)),
        ])
    });

    let title = if state.filtered {
        format!("Search results ({})", state.rows.len())
    } else {
        format!("Transactions ({})", state.rows.len())
    };
    let border = if state.focus == Focus::Table {
        theme.accent
    } else {
        theme.border
    };

    let widths = [
        Constraint::Percentage(50),
        Constraint::Length(14),
        Constraint::Min(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !state.rows.is_empty() {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);

    let mut scrollbar_state = ScrollbarState::new(state.rows.len()).position(state.selected);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

pub fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Search;
    let (text, style) = if state.query.is_empty() && !focused {
        ("category, YYYY-MM-DD or amount", Style::default().fg(theme.dim))
    } else {
        (state.query.as_str(), Style::default().fg(theme.text))
    };
    let border = if focused { theme.accent } else { theme.border };

    let block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let line = Line::from(Span::styled(text.to_string(), style));
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let width = u16::try_from(state.query.chars().count()).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(width).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}
