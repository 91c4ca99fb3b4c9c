//! Panel 2 — Trends: real vs forecast line chart and precision bar chart.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use ai4vt_core::series::{precision_bars, LineSeries, PrecisionBar, PRECISION_THRESHOLD_PCT};
use ai4vt_core::TimeRange;

use crate::app::{AppState, ChartFocus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.metrics.is_empty() {
        super::render_loading(f, area, "charts");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let line_window = app.trends.line_range.filter(&app.history, app.today);
    let series = LineSeries::build(&line_window);
    render_line_chart(
        f,
        chunks[0],
        &series,
        app.trends.line_range,
        app.trends.focus == ChartFocus::Line,
    );

    let bar_window = app.trends.precision_range.filter(&app.history, app.today);
    let bars = precision_bars(&bar_window);
    render_precision_chart(
        f,
        chunks[1],
        &bars,
        app.trends.precision_range,
        app.trends.focus == ChartFocus::Precision,
    );
}

fn chart_block(title: &str, range: TimeRange, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {title} — {} [ / ] ", range.label()))
        .title_style(theme::panel_title(focused))
}

fn render_empty_window(f: &mut Frame, area: Rect, block: Block<'static>) {
    let para = Paragraph::new(Span::styled("No data in this time range.", theme::muted())).block(block);
    f.render_widget(para, area);
}

/// First, middle and last date of a window as axis labels.
pub fn date_labels(dates: &[NaiveDate]) -> Vec<String> {
    let fmt = |d: &NaiveDate| d.format("%b %d").to_string();
    match dates {
        [] => Vec::new(),
        [only] => vec![fmt(only)],
        [first, .., last] => {
            let mid = &dates[dates.len() / 2];
            vec![fmt(first), fmt(mid), fmt(last)]
        }
    }
}

fn render_line_chart(f: &mut Frame, area: Rect, series: &LineSeries, range: TimeRange, focused: bool) {
    let block = chart_block("Real vs Forecasted Move", range, focused);
    if series.dates.is_empty() {
        render_empty_window(f, area, block);
        return;
    }

    let [y_min, y_max] = series.y_bounds();
    let x_max = series.dates.len().saturating_sub(1).max(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Real Move %")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::REAL))
            .graph_type(GraphType::Line)
            .data(&series.real),
        Dataset::default()
            .name("Forecasted %")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::FORECAST))
            .graph_type(GraphType::Line)
            .data(&series.forecast),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(date_labels(&series.dates)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("%", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.1}"), format!("{:.1}", (y_min + y_max) / 2.0), format!("{y_max:.1}")]),
        );

    f.render_widget(chart, area);
}

fn render_precision_chart(f: &mut Frame, area: Rect, bars: &[PrecisionBar], range: TimeRange, focused: bool) {
    let block = chart_block("Forecast Precision", range, focused);
    if bars.is_empty() {
        render_empty_window(f, area, block);
        return;
    }

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let (precise, imprecise): (Vec<_>, Vec<_>) = bars
        .iter()
        .enumerate()
        .map(|(i, b)| (b.precise, (i as f64, b.diff)))
        .partition(|(p, _)| *p);
    let precise: Vec<(f64, f64)> = precise.into_iter().map(|(_, pt)| pt).collect();
    let imprecise: Vec<(f64, f64)> = imprecise.into_iter().map(|(_, pt)| pt).collect();

    let x_max = bars.len().saturating_sub(1).max(1) as f64;
    let threshold = [(0.0, PRECISION_THRESHOLD_PCT), (x_max, PRECISION_THRESHOLD_PCT)];
    let y_max = bars
        .iter()
        .map(|b| b.diff)
        .fold(PRECISION_THRESHOLD_PCT, f64::max)
        * 1.1;

    let datasets = vec![
        Dataset::default()
            .name("Precise")
            .marker(symbols::Marker::HalfBlock)
            .style(theme::positive())
            .graph_type(GraphType::Bar)
            .data(&precise),
        Dataset::default()
            .name("Imprecise")
            .marker(symbols::Marker::HalfBlock)
            .style(Style::default().fg(theme::FORECAST))
            .graph_type(GraphType::Bar)
            .data(&imprecise),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .style(theme::warning())
            .graph_type(GraphType::Line)
            .data(&threshold),
    ];

    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(date_labels(&dates)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("|diff| %", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format!("{PRECISION_THRESHOLD_PCT}"), format!("{y_max:.1}")]),
        );
    f.render_widget(chart, split[0]);

    let precise_count = bars.iter().filter(|b| b.precise).count();
    let legend = Line::from(vec![
        Span::styled(" ■ ", theme::positive()),
        Span::styled(format!("Precise (< {PRECISION_THRESHOLD_PCT}%)"), theme::text()),
        Span::styled("   ■ ", Style::default().fg(theme::FORECAST)),
        Span::styled(format!("Imprecise (≥ {PRECISION_THRESHOLD_PCT}%)"), theme::text()),
        Span::styled("   ─ ", theme::warning()),
        Span::styled("threshold", theme::muted()),
        Span::styled(
            format!("   {precise_count}/{} precise", bars.len()),
            theme::muted().add_modifier(Modifier::ITALIC),
        ),
    ]);
    f.render_widget(Paragraph::new(legend), split[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_pick_first_middle_last() {
        let d = |s: &str| s.parse::<NaiveDate>().unwrap();
        assert!(date_labels(&[]).is_empty());
        assert_eq!(date_labels(&[d("2025-04-18")]), vec!["Apr 18"]);
        let dates = [d("2025-04-14"), d("2025-04-15"), d("2025-04-16"), d("2025-04-17")];
        assert_eq!(date_labels(&dates), vec!["Apr 14", "Apr 16", "Apr 17"]);
    }
}
