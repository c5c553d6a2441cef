use engine::MoneyCents;
use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
};

use crate::ui::theme::Theme;

/// Amount rendered the way search matches it, negatives highlighted.
#[must_use]
pub fn styled_amount(amount: MoneyCents, theme: &Theme) -> Line<'static> {
    let color = if amount.cents() < 0 {
        theme.negative
    } else {
        theme.text
    };
    Line::from(Span::styled(amount.compact(), Style::default().fg(color)))
        .alignment(Alignment::Right)
}
