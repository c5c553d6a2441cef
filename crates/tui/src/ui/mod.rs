pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::TerminalGuard;
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Title, table, search box, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Personal Finance Tracker",
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    screens::table::render_table(frame, layout[1], state, &theme);
    screens::table::render_search(frame, layout[2], state, &theme);
    render_bottom_bar(frame, layout[3], state, &theme);
    components::dialog::render(frame, area, state.dialog.as_ref());
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("File", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.data_file)),
        components::hints::hint_separator(theme),
        Span::raw(format!("{} rows", state.rows.len())),
        components::hints::hint_separator(theme),
    ];
    parts.extend(components::hints::hints_to_spans(
        &components::hints::for_focus(state.focus),
        theme,
    ));
    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(
        &[components::hints::quit(state.focus)],
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
