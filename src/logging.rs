//! Tracing bootstrap.
//!
//! Tracing is opt-in via `RUST_LOG`. CLI commands log to stderr; while the TUI
//! owns the terminal, events go to `<data-dir>/tt.log` instead.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

pub const LOG_FILE_NAME: &str = "tt.log";

/// Where log output should go.
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

/// Parse `RUST_LOG`, ignoring empty, oversized or invalid filters.
fn env_filter() -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"))
}

fn make_writer(target: LogTarget<'_>) -> BoxMakeWriter {
    match target {
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::File(dir) => {
            let file = fs::create_dir_all(dir).and_then(|_| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(dir.join(LOG_FILE_NAME))
            });
            match file {
                Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
                // Never write to the terminal under the TUI.
                Err(_) => BoxMakeWriter::new(std::io::sink),
            }
        }
    }
}

/// Install the global subscriber. Must be called once, before any event.
pub fn init(target: LogTarget<'_>) {
    let ansi = matches!(target, LogTarget::Stderr);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(make_writer(target)).with_ansi(ansi))
        .with(env_filter())
        .init();
}
