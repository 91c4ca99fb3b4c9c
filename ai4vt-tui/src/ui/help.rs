//! Panel 4 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use ai4vt_core::series::PRECISION_THRESHOLD_PCT;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-4", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Refetch results");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Trends");
    key(&mut lines, "[ / ]", "Previous / next time range");
    key(&mut lines, "f", "Switch chart the range keys act on");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — History");
    key(&mut lines, "j / k", "Move row cursor down / up");
    key(&mut lines, "h / l", "Previous / next page");
    key(&mut lines, "g / G", "First / last page");
    key(&mut lines, "Enter", "Open the news summary for the row");
    key(&mut lines, "Esc", "Close the summary");
    lines.push(Line::from(""));

    section(&mut lines, "Reading the dashboard");
    key(&mut lines, "Forecast Accuracy", "Share of days the forecast direction was right");
    key(&mut lines, "Prediction", "LLM-based prediction of market movement");
    key(&mut lines, "Calculated", "Algorithmic calculation from sentiment and confidence");
    key(&mut lines, "Average", "Mean of the Prediction and Calculated values");
    key(
        &mut lines,
        "Precise",
        &format!("Same sign as the real move and off by less than {PRECISION_THRESHOLD_PCT}%"),
    );
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("  Data source: {}", app.source_name),
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
