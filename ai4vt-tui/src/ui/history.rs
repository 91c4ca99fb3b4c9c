//! Panel 3 — History: newest-first paginated table of daily records.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use ai4vt_core::metrics::{format_value, Direction as Move};
use ai4vt_core::{DailyRecord, NumericField};

use crate::app::AppState;
use crate::theme;

pub const HEADERS: [&str; 11] = [
    "Date",
    "Open",
    "Close Yest.",
    "Real %",
    "Forecast %",
    "Calc %",
    "Avg %",
    "Sentiment",
    "Confidence",
    "Correct",
    "Headline",
];

pub const LEGEND: [&str; 3] = [
    "Prediction: LLM-based prediction of market movement.",
    "Calculated: Algorithmic calculation using LLM outputs like sentiment and confidence.",
    "Average: The average of the Prediction and Calculated values.",
];

/// Display cells for one record, in [`HEADERS`] order.
pub fn row_cells(r: &DailyRecord) -> Vec<String> {
    let v = |field: NumericField| format_value(field.value(r), field.unit());
    vec![
        r.date_key(),
        v(NumericField::OpenToday),
        v(NumericField::CloseYesterday),
        v(NumericField::RealMovePct),
        v(NumericField::ForecastedPct),
        v(NumericField::CalculatedPct),
        v(NumericField::AveragePct),
        v(NumericField::SentimentScore),
        v(NumericField::ConfidenceLevel),
        if r.correct { "✓".into() } else { "✗".into() },
        r.headline_or_fallback().to_string(),
    ]
}

/// Signed cells are coloured by sign; the rest stay plain.
fn cell_style(column: usize, r: &DailyRecord) -> Style {
    let signed = match column {
        3 => Some(r.real_move_pct),
        4 => Some(r.forecasted_pct),
        5 => Some(r.calculated_pct),
        6 => Some(r.average_pct),
        _ => None,
    };
    match (column, signed) {
        (_, Some(v)) => theme::direction(Move::of_value(v)),
        (9, None) if r.correct => theme::positive(),
        (9, None) => theme::negative(),
        (10, None) => theme::muted(),
        _ => theme::text(),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.history.is_empty() {
        super::render_loading(f, area, "history");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(LEGEND.len() as u16),
        ])
        .split(area);

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(theme::accent_bold())
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .page_rows()
        .into_iter()
        .map(|r| {
            let cells = row_cells(r)
                .into_iter()
                .enumerate()
                .map(|(i, text)| Cell::from(text).style(cell_style(i, r)));
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme::selected_row())
        .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.table.cursor));
    f.render_stateful_widget(table, chunks[0], &mut state);

    let footer = Line::from(vec![
        Span::styled(
            format!(
                " Page {} of {}",
                app.table.pager.page(),
                app.total_pages()
            ),
            theme::accent(),
        ),
        Span::styled(
            format!("  ({} records)  [h/l] page  [j/k] row  [Enter] summary", app.history.len()),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[1]);

    let legend: Vec<Line> = LEGEND
        .iter()
        .map(|l| Line::from(Span::styled(format!(" {l}"), theme::muted())))
        .collect();
    f.render_widget(Paragraph::new(legend), chunks[2]);
}
