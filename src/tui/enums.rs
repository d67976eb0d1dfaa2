//! Enumerations for TUI state management.

/// Which screen or overlay is receiving input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    Help,
    Confirm,
}

/// Which pane of the main screen has keyboard focus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    List,
    Calendar,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::List => Focus::Calendar,
            Focus::Calendar => Focus::List,
        }
    }
}

/// Calendar navigation steps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CalendarMove {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    Today,
}
