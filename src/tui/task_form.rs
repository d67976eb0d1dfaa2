//! Add-task form for the terminal user interface.
//!
//! The form owns two ephemeral text fields. Submitting validates them and, on
//! success, hands back an [`AddIntent`] and clears both fields. A rejected
//! submission leaves the fields exactly as typed.

use chrono::NaiveDate;

use crate::dates::ISO_DATE;
use crate::error::Result;
use crate::task::AddIntent;
use crate::tui::input::InputField;

pub const NAME_FIELD: usize = 0;
pub const DUE_FIELD: usize = 1;
const FIELD_COUNT: usize = 2;

pub struct TaskForm {
    pub name: InputField,
    pub due: InputField,
    pub current_field: usize,
}

impl TaskForm {
    pub fn new() -> Self {
        let mut form = TaskForm {
            name: InputField::new(),
            due: InputField::new(),
            current_field: NAME_FIELD,
        };
        form.update_active_field();
        form
    }

    /// A form whose date is pre-filled, e.g. from the calendar selection.
    pub fn with_due(due: NaiveDate) -> Self {
        let mut form = Self::new();
        form.due = InputField::with_value(&due.format(ISO_DATE).to_string());
        form.update_active_field();
        form
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn update_active_field(&mut self) {
        self.name.active = self.current_field == NAME_FIELD;
        self.due.active = self.current_field == DUE_FIELD;
    }

    pub fn current_input_mut(&mut self) -> &mut InputField {
        match self.current_field {
            DUE_FIELD => &mut self.due,
            _ => &mut self.name,
        }
    }

    /// Validate the fields and emit an add-intent, clearing the form.
    pub fn submit(&mut self, today: NaiveDate) -> Result<AddIntent> {
        let intent = AddIntent::parse(&self.name.value, &self.due.value, today)?;
        self.name.clear();
        self.due.clear();
        self.current_field = NAME_FIELD;
        self.update_active_field();
        Ok(intent)
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}
