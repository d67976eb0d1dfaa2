//! Task data structure and id generation.
//!
//! A `Task` is the only persisted entity. Its JSON attribute names (`id`, `name`,
//! `dueDate`, `completed`) are the stored format, so blobs written by earlier
//! versions of the tracker load unchanged.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::parse_due_input;
use crate::error::{Error, Result};

/// A to-do item with a due date and a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, name: &str, due_date: NaiveDate) -> Self {
        Task {
            id,
            name: name.to_string(),
            due_date,
            completed: false,
        }
    }
}

/// A validated request to add a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddIntent {
    pub name: String,
    pub due_date: NaiveDate,
}

impl AddIntent {
    /// Validate raw name and due-date text. Blank input is rejected before the
    /// date is parsed.
    pub fn parse(name: &str, due: &str, today: NaiveDate) -> Result<Self> {
        let name = name.trim();
        let due = due.trim();
        if name.is_empty() || due.is_empty() {
            return Err(Error::MissingFields);
        }
        let due_date = parse_due_input(due, today).ok_or_else(|| Error::InvalidDate(due.to_string()))?;
        Ok(AddIntent {
            name: name.to_string(),
            due_date,
        })
    }
}

/// Issues strictly increasing task ids.
///
/// Ids look like millisecond timestamps but never repeat: each id is the later of
/// the wall clock and the previously issued id plus one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Seed the generator past every id already in use.
    pub fn seeded(tasks: &[Task]) -> Self {
        IdGenerator {
            last: tasks.iter().map(|t| t.id).max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn ids_strictly_increase_within_one_tick() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn seeded_generator_skips_existing_ids() {
        let far_future = u64::MAX / 2;
        let tasks = vec![Task::new(far_future, "x", date("2024-01-01"))];
        let mut ids = IdGenerator::seeded(&tasks);
        assert_eq!(ids.next_id(), far_future + 1);
    }

    #[test]
    fn add_intent_requires_both_fields() {
        let today = date("2024-01-01");
        assert!(matches!(AddIntent::parse("", "2024-01-02", today), Err(Error::MissingFields)));
        assert!(matches!(AddIntent::parse("x", "  ", today), Err(Error::MissingFields)));
        assert!(matches!(AddIntent::parse("x", "later", today), Err(Error::InvalidDate(d)) if d == "later"));
        let intent = AddIntent::parse(" Buy milk ", "2024-01-10", today).unwrap();
        assert_eq!(intent.name, "Buy milk");
        assert_eq!(intent.due_date, date("2024-01-10"));
    }

    #[test]
    fn json_uses_camel_case_attributes() {
        let task = Task::new(7, "Buy milk", date("2024-01-10"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2024-01-10");
        assert_eq!(json["completed"], false);
        assert_eq!(json["name"], "Buy milk");
    }

    #[test]
    fn missing_completed_defaults_to_false() {
        let task: Task =
            serde_json::from_str(r#"{"id":1,"name":"a","dueDate":"2024-02-29"}"#).unwrap();
        assert!(!task.completed);
        assert_eq!(task.due_date, date("2024-02-29"));
    }
}
