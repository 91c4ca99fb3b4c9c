//! Top-level UI layout — header, active panel, status bar, overlays.

pub mod help;
pub mod history;
pub mod overlays;
pub mod overview;
pub mod status_bar;
pub mod trends;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

pub const TITLE: &str = "Forecasting VT ETF's Next Opening";

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: header + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header_area = chunks[0];
    let main_area = chunks[1];
    let status_area = chunks[2];

    draw_header(f, header_area, app);
    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Summary { date, state } => overlays::render_summary(f, main_area, *date, state),
        Overlay::None => {}
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let open = app.market.is_open();
    let mut spans = vec![
        Span::styled(format!(" {TITLE} "), theme::accent_bold()),
        Span::raw(" "),
        Span::styled("●", theme::market_dot(open)),
        Span::styled(format!(" {}", app.market.label()), theme::text()),
        Span::styled(format!("  source: {}", app.source_name), theme::muted()),
    ];
    if let Some(ts) = app.last_updated {
        spans.push(Span::styled(
            format!("  updated {}", ts.format("%H:%M:%S")),
            theme::muted(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Overview => overview::render(f, inner, app),
        Panel::Trends => trends::render(f, inner, app),
        Panel::History => history::render(f, inner, app),
        Panel::Help => help::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Placeholder shown while the first fetch is outstanding.
pub(crate) fn render_loading(f: &mut Frame, area: Rect, what: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("Loading {what}..."), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
