//! Application state and the transitions that change it.
//!
//! The `Shell` is the single owner of the task sequence. Every task-changing
//! intent replaces the whole sequence with the result of a pure operation and
//! then persists it. Filter and calendar selection are view state and are never
//! written to storage.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::Result;
use crate::fields::StatusFilter;
use crate::ops;
use crate::store::{self, BlobStore};
use crate::task::{IdGenerator, Task};

pub struct Shell<S: BlobStore> {
    store: S,
    tasks: Vec<Task>,
    filter: StatusFilter,
    selected_date: NaiveDate,
    ids: IdGenerator,
}

impl<S: BlobStore> Shell<S> {
    /// Hydrate the task sequence from `store`.
    pub fn start(store: S, today: NaiveDate) -> Self {
        let tasks = store::hydrate(&store);
        info!(count = tasks.len(), "loaded tasks");
        Shell {
            ids: IdGenerator::seeded(&tasks),
            store,
            tasks,
            filter: StatusFilter::All,
            selected_date: today,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing the active filter, in sequence order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        ops::filter_by_status(&self.tasks, self.filter)
    }

    /// Append a task and return its id.
    ///
    /// On a storage error the task is still kept in memory.
    pub fn add(&mut self, name: &str, due_date: NaiveDate) -> Result<u64> {
        let id = self.ids.next_id();
        let next = ops::add_task(&self.tasks, id, name, due_date);
        self.commit(next)?;
        info!(id, name, %due_date, "added task");
        Ok(id)
    }

    /// Flip completion of `id`. Returns whether a task matched.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let matched = self.get(id).is_some();
        let next = ops::toggle_completion(&self.tasks, id);
        self.commit(next)?;
        info!(id, matched, "toggled task");
        Ok(matched)
    }

    /// Remove `id`. Returns whether a task matched.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        let matched = self.get(id).is_some();
        let next = ops::delete_task(&self.tasks, id);
        self.commit(next)?;
        info!(id, matched, "deleted task");
        Ok(matched)
    }

    pub fn sort_by_due_date(&mut self) -> Result<()> {
        let next = ops::sort_by_due_date(&self.tasks);
        self.commit(next)?;
        info!("sorted tasks by due date");
        Ok(())
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Replace the sequence, then write it out in full.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        self.tasks = next;
        store::persist(&mut self.store, &self.tasks).inspect_err(|e| {
            warn!(error = %e, "failed to persist tasks; keeping in-memory state");
        })
    }
}
