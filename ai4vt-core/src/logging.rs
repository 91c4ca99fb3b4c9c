//! Tracing subscriber setup for the two front ends.
//!
//! The filter comes from `AI4VT_LOG` (EnvFilter syntax), defaulting to
//! `info` for this workspace and `warn` for dependencies.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "AI4VT_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn,ai4vt_core=info,ai4vt_tui=info,ai4vt_cli=info"))
}

/// Log to a daily-rolling file under `dir`; nothing touches the terminal.
///
/// Keep the returned guard alive for the lifetime of the program, or
/// buffered lines are lost on exit.
pub fn init_file(dir: &Path, prefix: &str) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_ansi(false).with_target(true).with_writer(writer);

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(layer)
        .try_init();

    Ok(guard)
}

/// Log to stderr, keeping stdout clean for command output.
pub fn init_stderr() {
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(filter())
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let guard = init_file(&log_dir, "test.log").unwrap();
        tracing::info!("hello");
        drop(guard);
        assert!(log_dir.is_dir());
    }
}
