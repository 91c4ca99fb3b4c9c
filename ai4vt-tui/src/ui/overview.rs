//! Panel 1 — Overview: KPI cards and the latest headline summary.

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use ai4vt_core::metrics::{format_delta, format_value};
use ai4vt_core::pagination::newest_first;
use ai4vt_core::{DailyRecord, DerivedMetrics, Direction, NumericField, Unit};

use crate::app::AppState;
use crate::theme;

/// Cards per row on the overview grid.
const CARDS_PER_ROW: usize = 3;

/// Headlines listed under the headline summary.
pub const RECENT_HEADLINES: usize = 5;

/// One KPI card, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub delta: String,
    pub direction: Direction,
    pub caption: String,
}

impl KpiCard {
    fn field(title: &'static str, metrics: &DerivedMetrics, field: NumericField) -> Self {
        let value = metrics.latest.as_ref().and_then(|r| field.value(r));
        let delta = metrics.delta(field);
        Self {
            title,
            value: format_value(value, field.unit()),
            delta: format_delta(delta, field.unit()),
            direction: Direction::of(delta),
            caption: "vs previous day".into(),
        }
    }
}

/// Build the card row from the derived metrics.
pub fn kpi_cards(metrics: &DerivedMetrics) -> Vec<KpiCard> {
    let win_delta = metrics.win_rate_delta();
    let latest = metrics.latest.as_ref();

    let accuracy = KpiCard {
        title: "Forecast Accuracy",
        value: format!("{}%", metrics.win_rate),
        delta: format_delta(win_delta, Unit::Percent),
        direction: Direction::of(win_delta),
        caption: format!("{} of {} days correct", metrics.correct_count, metrics.sample_size),
    };

    let mut volatility = KpiCard::field("Volatility", metrics, NumericField::VolatilityIndicator);
    if let Some(v) = latest.and_then(|r| r.volatility_indicator.as_ref()) {
        volatility.value = v.to_string();
    }

    let mut improvement = KpiCard::field("Improvement", metrics, NumericField::Improvement);
    if let Some(r) = latest {
        improvement.value = r.improvement_display();
    }

    vec![
        accuracy,
        KpiCard::field("Today Average Forecast", metrics, NumericField::AveragePct),
        KpiCard::field("Prediction Confidence", metrics, NumericField::ConfidenceLevel),
        KpiCard::field("Today Open Price", metrics, NumericField::OpenToday),
        KpiCard::field("Real Market Move", metrics, NumericField::RealMovePct),
        KpiCard::field("Sentiment Score", metrics, NumericField::SentimentScore),
        KpiCard::field("Market Impact", metrics, NumericField::MarketImpactScore),
        volatility,
        improvement,
    ]
}

/// The `limit` most recent headlines, newest first, with the fallback for blank days.
pub fn recent_headlines(history: &[DailyRecord], limit: usize) -> Vec<(NaiveDate, String)> {
    newest_first(history)
        .into_iter()
        .take(limit)
        .map(|r| (r.date, r.headline_or_fallback().to_string()))
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.metrics.is_empty() {
        super::render_loading(f, area, "metrics");
        return;
    }

    let cards = kpi_cards(&app.metrics);
    let card_rows: Vec<&[KpiCard]> = cards.chunks(CARDS_PER_ROW).collect();

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(card_rows.iter().map(|_| Constraint::Length(5)));
    constraints.push(Constraint::Min(4));
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints(constraints)
        .split(area);

    render_hero(f, rows[0], app);
    for (row, area) in card_rows.iter().zip(rows.iter().skip(1)) {
        render_card_row(f, *area, row);
    }
    render_headline(f, rows[rows.len() - 1], app);
}

fn render_hero(f: &mut Frame, area: Rect, app: &AppState) {
    let date = app
        .metrics
        .latest
        .as_ref()
        .map(|r| r.date_key())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "AI-driven daily forecasts of VT's opening move from news sentiment.",
            theme::text(),
        )),
        Line::from(Span::styled(
            format!("Latest forecast: {date}  |  {} days tracked", app.metrics.sample_size),
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_card_row(f: &mut Frame, area: Rect, cards: &[KpiCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let cols = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, col) in cards.iter().zip(cols.iter()) {
        render_card(f, *col, card);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &KpiCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", card.title))
        .title_style(theme::accent());

    let badge = theme::direction(card.direction);
    let lines = vec![
        Line::from(Span::styled(card.value.clone(), theme::value_bold())),
        Line::from(vec![
            Span::styled(format!("{} {}", card.direction.arrow(), card.delta), badge),
        ]),
        Line::from(Span::styled(card.caption.clone(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_headline(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Headline Summary ")
        .title_style(theme::accent());

    let headline = app
        .metrics
        .latest
        .as_ref()
        .map(|r| r.headline_or_fallback().to_string())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(headline, theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(app.headline_text().to_string(), theme::text())),
        Line::from(""),
        Line::from(Span::styled("Recent headlines", theme::accent())),
    ];
    for (date, text) in recent_headlines(&app.history, RECENT_HEADLINES) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", date.format("%b %d")), theme::muted()),
            Span::styled(text, theme::text()),
        ]));
    }
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
