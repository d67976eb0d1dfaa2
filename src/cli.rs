use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal task tracker with due dates, status filters and a calendar.
/// Tasks are stored as JSON in `<data-dir>/tasks.json`.
#[derive(Parser)]
#[command(name = "tt", version, about = "Track tasks with due dates, filters and a calendar")]
pub struct Cli {
    /// Directory holding the task store. Defaults to ~/.task_tracker.
    #[arg(long, global = true, env = "TASK_TRACKER_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run; launches the interactive UI when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

pub fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".task_tracker")
}
