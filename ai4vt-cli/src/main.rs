//! AI4VT CLI — query the forecast feed from the shell.
//!
//! Commands:
//! - `results` — newest-first page of the record table
//! - `stats` — win rate, latest/previous dates, day-over-day deltas
//! - `summary` — news digest for one date
//! - `export` — write the full history to CSV

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use ai4vt_core::metrics::{format_delta, format_value};
use ai4vt_core::pagination::newest_first;
use ai4vt_core::{
    logging, ApiError, DailyRecord, DashboardConfig, DerivedMetrics, NumericField, Paginator,
    ResultsSource, SampleSource, Unit,
};

/// Days of generated history with `--demo`.
const DEMO_DAYS: usize = 250;
const DEMO_SEED: u64 = 42;

#[derive(Parser)]
#[command(
    name = "ai4vt",
    about = "AI4VT CLI — VT ETF opening-move forecasts",
    version
)]
struct Cli {
    /// Config file (default: <config dir>/ai4vt/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Serve a generated history instead of calling the API.
    #[arg(long, global = true, default_value_t = false)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of the record table, newest first.
    Results {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page. Defaults to the configured page size.
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Print win rate and day-over-day deltas.
    Stats {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the news summary for a date (YYYY-MM-DD).
    Summary { date: NaiveDate },
    /// Write the full history to a CSV file.
    Export {
        /// Output path.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_stderr();

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let source: Box<dyn ResultsSource> = if cli.demo {
        Box::new(SampleSource::new(DEMO_DAYS, Local::now().date_naive(), DEMO_SEED))
    } else {
        Box::new(config.client()?)
    };
    info!(source = source.name(), "using results source");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Results { page, page_size } => {
            let size = page_size.unwrap_or(config.page_size);
            run_results(source.as_ref(), page, size, &mut out)
        }
        Commands::Stats { json } => run_stats(source.as_ref(), json, &mut out),
        Commands::Summary { date } => run_summary(source.as_ref(), date, &mut out),
        Commands::Export { out: path } => run_export(source.as_ref(), &path, &mut out),
    }
}

// ─── Commands ───────────────────────────────────────────────────────

fn run_results(source: &dyn ResultsSource, page: usize, page_size: usize, out: &mut impl Write) -> Result<()> {
    let history = source.fetch_results()?;
    let mut pager = Paginator::new(page_size)?;
    pager.go_to(page, history.len());
    write_page(&history, &pager, out)
}

fn run_stats(source: &dyn ResultsSource, json: bool, out: &mut impl Write) -> Result<()> {
    let history = source.fetch_results()?;
    let metrics = DerivedMetrics::compute(&history);
    if json {
        serde_json::to_writer_pretty(&mut *out, &StatsReport::from(&metrics))?;
        writeln!(out)?;
    } else {
        write_stats(&metrics, out)?;
    }
    Ok(())
}

fn run_summary(source: &dyn ResultsSource, date: NaiveDate, out: &mut impl Write) -> Result<()> {
    match source.fetch_summary(date) {
        Ok(summary) => writeln!(out, "{}", summary.text_or_fallback())?,
        Err(ApiError::SummaryNotFound { .. }) => {
            writeln!(out, "{}", ai4vt_core::domain::SUMMARY_EMPTY)?
        }
        Err(e) => return Err(e).with_context(|| format!("failed to load summary for {date}")),
    }
    Ok(())
}

fn run_export(source: &dyn ResultsSource, path: &Path, out: &mut impl Write) -> Result<()> {
    let history = source.fetch_results()?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let written = write_csv(&history, file)?;
    info!(rows = written, path = %path.display(), "export complete");
    writeln!(out, "Exported {written} records to {}", path.display())?;
    Ok(())
}

// ─── Output ─────────────────────────────────────────────────────────

fn write_page(history: &[DailyRecord], pager: &Paginator, out: &mut impl Write) -> Result<()> {
    let rows = newest_first(history);
    let total = pager.total_pages(rows.len());

    writeln!(
        out,
        "{:<10}  {:>9}  {:>8}  {:>9}  {:>8}  {:>8}  {:>7}  Headline",
        "Date", "Open", "Real %", "Forecast", "Calc %", "Avg %", "Correct"
    )?;
    for r in pager.slice(&rows) {
        let v = |field: NumericField| format_value(field.value(r), field.unit());
        writeln!(
            out,
            "{:<10}  {:>9}  {:>8}  {:>9}  {:>8}  {:>8}  {:>7}  {}",
            r.date_key(),
            v(NumericField::OpenToday),
            v(NumericField::RealMovePct),
            v(NumericField::ForecastedPct),
            v(NumericField::CalculatedPct),
            v(NumericField::AveragePct),
            if r.correct { "yes" } else { "no" },
            r.headline_or_fallback(),
        )?;
    }
    writeln!(
        out,
        "Page {} of {} ({} records)",
        pager.page(),
        total,
        rows.len()
    )?;
    Ok(())
}

fn write_stats(metrics: &DerivedMetrics, out: &mut impl Write) -> Result<()> {
    let date = |r: &Option<DailyRecord>| {
        r.as_ref()
            .map(|r| r.date_key())
            .unwrap_or_else(|| "-".to_string())
    };

    writeln!(
        out,
        "Win rate:  {}% ({} of {} correct, {} vs previous)",
        metrics.win_rate,
        metrics.correct_count,
        metrics.sample_size,
        format_delta(metrics.win_rate_delta(), Unit::Percent)
    )?;
    writeln!(out, "Latest:    {}", date(&metrics.latest))?;
    writeln!(out, "Previous:  {}", date(&metrics.previous))?;
    writeln!(out)?;
    writeln!(out, "{:<18}  {:>10}  {:>10}", "Field", "Latest", "Delta")?;
    for (field, delta) in metrics.deltas() {
        let latest = metrics.latest.as_ref().and_then(|r| field.value(r));
        writeln!(
            out,
            "{:<18}  {:>10}  {:>10}",
            field.label(),
            format_value(latest, field.unit()),
            format_delta(delta, field.unit())
        )?;
    }
    Ok(())
}

/// JSON shape of `stats --json`.
#[derive(Debug, Serialize)]
struct StatsReport {
    win_rate: u32,
    previous_win_rate: Option<u32>,
    correct_count: usize,
    sample_size: usize,
    latest_date: Option<NaiveDate>,
    previous_date: Option<NaiveDate>,
    deltas: serde_json::Map<String, serde_json::Value>,
}

impl From<&DerivedMetrics> for StatsReport {
    fn from(m: &DerivedMetrics) -> Self {
        let deltas = m
            .deltas()
            .into_iter()
            .map(|(field, delta)| (field.key().to_string(), serde_json::json!(delta)))
            .collect();
        Self {
            win_rate: m.win_rate,
            previous_win_rate: m.previous_win_rate,
            correct_count: m.correct_count,
            sample_size: m.sample_size,
            latest_date: m.latest.as_ref().map(|r| r.date),
            previous_date: m.previous.as_ref().map(|r| r.date),
            deltas,
        }
    }
}

/// One CSV line; unavailable numbers are left empty.
#[derive(Debug, Serialize)]
struct CsvRow {
    date: String,
    open_today: Option<f64>,
    close_yesterday: Option<f64>,
    real_move_pct: Option<f64>,
    forecasted_pct: Option<f64>,
    calculated_pct: Option<f64>,
    average_pct: Option<f64>,
    confidence_level: Option<f64>,
    sentiment_score: Option<f64>,
    market_impact_score: Option<f64>,
    volatility_indicator: String,
    correct: bool,
    improvement: Option<f64>,
    headline: String,
}

impl From<&DailyRecord> for CsvRow {
    fn from(r: &DailyRecord) -> Self {
        Self {
            date: r.date_key(),
            open_today: NumericField::OpenToday.value(r),
            close_yesterday: NumericField::CloseYesterday.value(r),
            real_move_pct: NumericField::RealMovePct.value(r),
            forecasted_pct: NumericField::ForecastedPct.value(r),
            calculated_pct: NumericField::CalculatedPct.value(r),
            average_pct: NumericField::AveragePct.value(r),
            confidence_level: NumericField::ConfidenceLevel.value(r),
            sentiment_score: NumericField::SentimentScore.value(r),
            market_impact_score: NumericField::MarketImpactScore.value(r),
            volatility_indicator: r
                .volatility_indicator
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            correct: r.correct,
            improvement: NumericField::Improvement.value(r),
            headline: r.headline.clone().unwrap_or_default(),
        }
    }
}

/// Write `history` oldest first; returns the number of data rows.
fn write_csv(history: &[DailyRecord], writer: impl Write) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let rows = ai4vt_core::metrics::chronological(history);
    for r in &rows {
        wtr.serialize(CsvRow::from(*r))?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai4vt_core::pagination::DEFAULT_PAGE_SIZE;

    fn source() -> SampleSource {
        SampleSource::new(23, NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(), 7)
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ai4vt", "results", "--page", "2", "--demo"]).unwrap();
        assert!(cli.demo);
        assert!(matches!(cli.command, Commands::Results { page: 2, page_size: None }));

        let cli = Cli::try_parse_from(["ai4vt", "summary", "2025-04-18"]).unwrap();
        match cli.command {
            Commands::Summary { date } => assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()),
            _ => panic!("expected summary"),
        }
        assert!(Cli::try_parse_from(["ai4vt", "summary", "yesterday"]).is_err());
    }

    #[test]
    fn results_last_page_is_partial() {
        let text = output(|out| run_results(&source(), 3, DEFAULT_PAGE_SIZE, out));
        assert!(text.contains("Page 3 of 3 (23 records)"));
        // header + 3 rows + footer
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn results_page_is_clamped() {
        let text = output(|out| run_results(&source(), 99, DEFAULT_PAGE_SIZE, out));
        assert!(text.contains("Page 3 of 3"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut buf = Vec::new();
        assert!(run_results(&source(), 1, 0, &mut buf).is_err());
    }

    #[test]
    fn stats_json_has_every_delta() {
        let text = output(|out| run_stats(&source(), true, out));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["sample_size"], 23);
        assert!(v["win_rate"].as_u64().unwrap() <= 100);
        let deltas = v["deltas"].as_object().unwrap();
        assert_eq!(deltas.len(), NumericField::ALL.len());
        assert!(deltas.contains_key("average_pct"));
    }

    #[test]
    fn stats_text_lists_fields() {
        let text = output(|out| run_stats(&source(), false, out));
        assert!(text.starts_with("Win rate:"));
        assert!(text.contains("Average Forecast"));
        assert!(text.contains("Latest:    2025-04-18"));
    }

    #[test]
    fn missing_summary_prints_fallback() {
        let date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let text = output(|out| run_summary(&source(), date, out));
        assert_eq!(text.trim(), "No summary found.");
    }

    #[test]
    fn csv_is_oldest_first_with_header() {
        let history = source().records().to_vec();
        let mut buf = Vec::new();
        let n = write_csv(&history, &mut buf).unwrap();
        assert_eq!(n, 23);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("date,open_today,close_yesterday"));
        let first = lines.next().unwrap();
        let last = text.lines().last().unwrap();
        assert!(first < last, "rows should be ascending by date");
    }

    #[test]
    fn export_writes_file_and_reports_through_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let text = output(|out| run_export(&source(), &path, out));
        assert_eq!(
            text.trim(),
            format!("Exported 23 records to {}", path.display())
        );
        let csv = std::fs::read_to_string(&path).unwrap();
        // header + one line per record
        assert_eq!(csv.lines().count(), 24);
    }

    #[test]
    fn csv_leaves_unavailable_numbers_empty() {
        let history = vec![DailyRecord::blank(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap())];
        let mut buf = Vec::new();
        write_csv(&history, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().nth(1).unwrap(), "2025-04-18,,,,,,,,,,,false,,");
    }
}
