//! AI4VT TUI — four-panel terminal dashboard for the VT-ETF forecast feed.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use ai4vt_core::{logging, DashboardConfig, ResultsSource, SampleSource};
use ai4vt_tui::app::AppState;
use ai4vt_tui::worker::{self, WorkerCommand};
use ai4vt_tui::{input, ui};

/// Days of generated history in demo mode.
const DEMO_DAYS: usize = 250;
const DEMO_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "ai4vt-tui", about = "Terminal dashboard for AI4VT VT-ETF forecasts", version)]
struct Args {
    /// Config file (default: <config dir>/ai4vt/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Serve a generated history instead of calling the API
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = DashboardConfig::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api_url = url;
    }

    // Terminal belongs to the UI; logs go to a file only.
    let _log_guard = logging::init_file(&config.log_dir(), "ai4vt-tui.log")
        .context("failed to set up logging")?;

    let source: Box<dyn ResultsSource> = if args.demo {
        Box::new(SampleSource::new(DEMO_DAYS, Local::now().date_naive(), DEMO_SEED))
    } else {
        Box::new(config.client()?)
    };
    let source_name = source.name().to_string();
    info!(source = %source_name, "starting dashboard");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(source, cmd_rx, resp_tx)?;

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, &config, source_name);
    app.request_results();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Market clock and auto-refresh
        app.tick(Instant::now());

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
