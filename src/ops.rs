//! Pure transforms over a task sequence.
//!
//! Every function takes the current sequence by reference and returns a new one;
//! the input is never modified. Ids that match nothing are a no-op, not an error.

use chrono::NaiveDate;

use crate::fields::StatusFilter;
use crate::task::Task;

/// Append a new, incomplete task.
pub fn add_task(tasks: &[Task], id: u64, name: &str, due_date: NaiveDate) -> Vec<Task> {
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.extend_from_slice(tasks);
    next.push(Task::new(id, name, due_date));
    next
}

/// Flip the completion flag of the task with `id`.
pub fn toggle_completion(tasks: &[Task], id: u64) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| {
            if t.id == id {
                Task {
                    completed: !t.completed,
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect()
}

/// Remove the task with `id`.
pub fn delete_task(tasks: &[Task], id: u64) -> Vec<Task> {
    tasks.iter().filter(|t| t.id != id).cloned().collect()
}

/// Order by due date, earliest first. Equal dates keep their relative order.
pub fn sort_by_due_date(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // `sort_by_key` is stable
    sorted.sort_by_key(|t| t.due_date);
    sorted
}

/// Read-only view of the tasks passing `filter`, in sequence order.
pub fn filter_by_status(tasks: &[Task], filter: StatusFilter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}
