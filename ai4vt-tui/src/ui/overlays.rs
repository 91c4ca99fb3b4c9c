//! Summary drawer for a history row.

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::SummaryState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_summary(f: &mut Frame, area: Rect, date: NaiveDate, state: &SummaryState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" Summary for {} [Esc]close ", date.format("%Y-%m-%d")))
        .title_style(theme::accent_bold());

    let style = match state {
        SummaryState::Loading => theme::muted(),
        SummaryState::Loaded(_) => theme::text(),
        SummaryState::Failed(_) => theme::negative(),
    };

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(state.text().to_string(), style)),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
