//! Command implementations for the CLI interface.
//!
//! Each mutating command hydrates a [`Shell`], applies one intent and lets the
//! shell persist the result, exactly as a key press in the TUI would.

use std::io;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::Cli;
use crate::dates::{format_due_relative, ISO_DATE};
use crate::error::Result;
use crate::fields::StatusFilter;
use crate::shell::Shell;
use crate::store::{BlobStore, FileBlobStore};
use crate::task::{AddIntent, Task};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui,

    /// Add a new task.
    Add {
        /// Task name.
        name: String,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd" or "in Nw".
        #[arg(long)]
        due: String,
    },

    /// List tasks.
    List {
        /// Show all, completed or pending tasks.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
    },

    /// Toggle completion of a task.
    Toggle {
        /// Task ID.
        id: u64,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Sort stored tasks by due date, earliest first.
    Sort,

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn cmd_ui(store: FileBlobStore) -> Result<()> {
    run_tui(store)?;
    Ok(())
}

pub fn cmd_add<S: BlobStore>(shell: &mut Shell<S>, name: &str, due: &str, today: NaiveDate) -> Result<()> {
    let intent = AddIntent::parse(name, due, today)?;
    let id = shell.add(&intent.name, intent.due_date)?;
    println!(
        "Added task {id}: {} (due {})",
        intent.name,
        intent.due_date.format(ISO_DATE)
    );
    Ok(())
}

pub fn cmd_list<S: BlobStore>(shell: &mut Shell<S>, filter: StatusFilter, today: NaiveDate) {
    shell.set_filter(filter);
    let tasks = shell.visible_tasks();
    if tasks.is_empty() {
        println!("No tasks ({})", filter.label().to_lowercase());
        return;
    }
    print_table(&tasks, today);
}

pub fn cmd_toggle<S: BlobStore>(shell: &mut Shell<S>, id: u64) -> Result<()> {
    if shell.toggle(id)? {
        let state = match shell.get(id) {
            Some(t) if t.completed => "completed",
            _ => "pending",
        };
        println!("Task {id} marked {state}");
    } else {
        println!("No task with ID {id}; nothing changed");
    }
    Ok(())
}

pub fn cmd_delete<S: BlobStore>(shell: &mut Shell<S>, id: u64) -> Result<()> {
    if shell.delete(id)? {
        println!("Deleted task {id}");
    } else {
        println!("No task with ID {id}; nothing changed");
    }
    Ok(())
}

pub fn cmd_sort<S: BlobStore>(shell: &mut Shell<S>) -> Result<()> {
    shell.sort_by_due_date()?;
    println!("Sorted {} tasks by due date", shell.tasks().len());
    Ok(())
}

pub fn cmd_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Print tasks as a fixed-width table.
pub fn print_table(tasks: &[&Task], today: NaiveDate) {
    println!("{:<14} {:<5} {:<11} {:<10} {}", "ID", "Done", "Due", "When", "Name");
    for t in tasks {
        println!(
            "{:<14} {:<5} {:<11} {:<10} {}",
            t.id,
            if t.completed { "[x]" } else { "[ ]" },
            t.due_date.format(ISO_DATE).to_string(),
            format_due_relative(t.due_date, today),
            t.name
        );
    }
}
