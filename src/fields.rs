//! Enumerations used to select and present tasks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Completion-status filter applied to the task list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    /// Whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        }
    }

    /// The next filter in display order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Tasks",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }
}
