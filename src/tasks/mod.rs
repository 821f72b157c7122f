//! Session task list.
//!
//! Tasks live only as long as the session. Ids are handed out by a per-list
//! counter and never reused, even after removal.

use serde::Serialize;
use tracing::debug;

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Unique id within the list
    pub id: u64,
    /// Non-empty description
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
}

/// An ordered list of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskList {
    tasks: Vec<Task>,
    #[serde(skip)]
    next_id: u64,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task and returns its id.
    ///
    /// Blank text is rejected and leaves the list unchanged.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring blank task");
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        debug!(id, "task added");
        Some(id)
    }

    /// Flips the completion of task `id`. Returns false if there is none.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                debug!(id, completed = task.completed, "task toggled");
                true
            }
            None => false,
        }
    }

    /// Deletes task `id`. Returns false if there is none.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(id, "task removed");
        }
        removed
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Returns true if the list is non-empty and every task is done.
    pub fn all_completed(&self) -> bool {
        !self.is_empty() && self.pending_count() == 0
    }
}
