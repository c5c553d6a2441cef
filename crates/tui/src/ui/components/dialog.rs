use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::{Dialog, DialogKind},
    ui::{components::centered_rect, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, dialog: Option<&Dialog>) {
    let Some(dialog) = dialog else {
        return;
    };
    let theme = Theme::default();
    let popup = centered_rect(50, 30, area);

    let color = match dialog.kind {
        DialogKind::Info => theme.info,
        DialogKind::Error => theme.error,
        DialogKind::Confirm => theme.accent,
    };
    let footer = match dialog.kind {
        DialogKind::Info | DialogKind::Error => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" ok"),
        ],
        DialogKind::Confirm => vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" yes  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" no"),
        ],
    };

    let lines = vec![
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(footer),
    ];
    let block = Block::default()
        .title(Span::styled(
            dialog.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let content = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(content, popup);
}
