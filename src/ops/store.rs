use std::collections::HashSet;

use chrono::{NaiveDate, Utc};

use crate::io::storage::{StorageError, TaskStorage};
use crate::model::task::{Task, TaskId, lowest_free_id, next_id};
use crate::util::date::parse_date;
use crate::util::html::{escape_html, strip_control};

/// Rejected `add` input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task text is empty")]
    EmptyText,
    #[error("due date is missing")]
    MissingDate,
    #[error("invalid due date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// `clear` on an empty collection; a warning rather than a failure
    #[error("there are no tasks to delete")]
    NothingToClear,
    #[error("could not save tasks: {0}")]
    Persist(#[from] StorageError),
}

/// Result of a `clear` request that was not refused outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The collection was emptied; holds the number of tasks removed
    Cleared(usize),
    /// The confirmation was declined; nothing changed
    Declined,
}

/// Owner of the task collection.
///
/// The collection is loaded when the store is built and written back through
/// the storage after every mutation. Ordering is newest first.
pub struct TaskStore<S: TaskStorage> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: TaskStorage> TaskStore<S> {
    /// Load the collection from `storage`
    pub fn open(storage: S) -> Self {
        let mut tasks = storage.load();
        let repaired = dedupe_ids(&mut tasks);
        if repaired > 0 {
            log::warn!("event=tasks_dedupe reassigned={}", repaired);
        }
        log::info!("event=store_open count={}", tasks.len());
        TaskStore { tasks, storage }
    }

    /// All tasks, newest first
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Validate, sanitize and prepend a new task.
    ///
    /// On a save failure the task stays in memory and the error is returned;
    /// the next successful save will include it.
    pub fn add(&mut self, text: &str, date: &str) -> Result<Task, StoreError> {
        let text = strip_control(text);
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let date = date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingDate.into());
        }
        let date: NaiveDate =
            parse_date(date).ok_or_else(|| ValidationError::InvalidDate(date.to_string()))?;

        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let task = Task::new(next_id(&self.tasks, now), escape_html(text), date);
        self.tasks.insert(0, task.clone());
        log::info!("event=task_add id={} date={}", task.id, task.date);
        self.persist()?;
        Ok(task)
    }

    /// Flip `done` on the task with `id`. Returns the new value, or `None`
    /// (and saves nothing) if no such task exists.
    pub fn toggle(&mut self, id: TaskId) -> Result<Option<bool>, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            log::debug!("event=task_toggle id={} status=not_found", id);
            return Ok(None);
        };
        task.done = !task.done;
        let done = task.done;
        log::info!("event=task_toggle id={} done={}", id, done);
        self.persist()?;
        Ok(Some(done))
    }

    /// Remove the task with `id`. Returns it, or `None` if absent.
    pub fn delete(&mut self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            log::debug!("event=task_delete id={} status=not_found", id);
            return Ok(None);
        };
        let removed = self.tasks.remove(pos);
        log::info!("event=task_delete id={}", id);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Remove every task after `confirm` agrees.
    ///
    /// An empty collection is refused with `NothingToClear` before `confirm`
    /// is consulted. `confirm` receives the number of tasks about to go.
    pub fn clear(&mut self, confirm: impl FnOnce(usize) -> bool) -> Result<ClearOutcome, StoreError> {
        if self.tasks.is_empty() {
            return Err(StoreError::NothingToClear);
        }
        let count = self.tasks.len();
        if !confirm(count) {
            log::debug!("event=tasks_clear status=declined count={}", count);
            return Ok(ClearOutcome::Declined);
        }
        self.tasks.clear();
        log::info!("event=tasks_clear count={}", count);
        self.persist()?;
        Ok(ClearOutcome::Cleared(count))
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.tasks).inspect_err(|e| {
            log::error!("event=tasks_save status=error error={}", e);
        })
    }
}

/// Give later duplicates of an id a fresh one. Returns how many changed.
fn dedupe_ids(tasks: &mut [Task]) -> usize {
    let mut used: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut seen = HashSet::new();
    let mut highest = used.iter().copied().max().unwrap_or(0);
    let mut changed = 0;
    for task in tasks.iter_mut() {
        if !seen.insert(task.id) {
            let id = match highest.checked_add(1) {
                Some(id) => {
                    highest = id;
                    id
                }
                None => lowest_free_id(used.iter().copied()),
            };
            task.id = id;
            used.insert(id);
            seen.insert(id);
            changed += 1;
        }
    }
    changed
}
