//! # tt - Task Tracker
//!
//! A terminal task tracker: add tasks with due dates, mark them complete,
//! delete them, filter by status, sort by due date and see what is due on a
//! month calendar.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI
//! tt
//!
//! # Add a task from the shell
//! tt add "Pay rent" --due 2024-01-01
//!
//! # List pending tasks
//! tt list --filter pending
//! ```
//!
//! All tasks live in a single JSON blob, `~/.task_tracker/tasks.json` by default
//! (override with `--data-dir` or `TASK_TRACKER_DIR`). The file is rewritten in
//! full after every change.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod dates;
pub mod error;
pub mod fields;
pub mod logging;
pub mod ops;
pub mod shell;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod calendar;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod task_list;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use logging::LogTarget;
use shell::Shell;
use store::FileBlobStore;

fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir();
    let command = cli.command.unwrap_or(Commands::Ui);

    match &command {
        Commands::Ui => logging::init(LogTarget::File(&data_dir)),
        _ => logging::init(LogTarget::Stderr),
    }

    let store = FileBlobStore::new(&data_dir);
    let today = today();

    let result = match command {
        Commands::Ui => cmd_ui(store),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
        command => {
            let mut shell = Shell::start(store, today);
            match command {
                Commands::Add { name, due } => cmd_add(&mut shell, &name, &due, today),
                Commands::List { filter } => {
                    cmd_list(&mut shell, filter, today);
                    Ok(())
                }
                Commands::Toggle { id } => cmd_toggle(&mut shell, id),
                Commands::Delete { id } => cmd_delete(&mut shell, id),
                Commands::Sort => cmd_sort(&mut shell),
                Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
