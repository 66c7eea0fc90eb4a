use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task identifier. Millisecond-timestamp shaped, strictly increasing
/// within a collection (see `next_id`).
pub type TaskId = u64;

/// One user-entered work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, HTML-escaped description
    pub text: String,
    /// Due date (`YYYY-MM-DD` on disk)
    pub date: NaiveDate,
    /// Completion flag, only ever flipped
    pub done: bool,
}

impl Task {
    /// Create a new, not-yet-done task. `text` must already be sanitized.
    pub fn new(id: TaskId, text: String, date: NaiveDate) -> Self {
        Task {
            id,
            text,
            date,
            done: false,
        }
    }

    /// Overdue = not done and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.date < today
    }
}

/// Pick an id for a new task: the current millisecond timestamp, bumped
/// past every id already in `tasks` so two adds in the same millisecond
/// can never collide.
pub fn next_id(tasks: &[Task], now_millis: u64) -> TaskId {
    let highest = tasks.iter().map(|t| t.id).max();
    match highest {
        Some(h) if h >= now_millis => h
            .checked_add(1)
            .unwrap_or_else(|| lowest_free_id(tasks.iter().map(|t| t.id))),
        _ => now_millis,
    }
}

/// Smallest positive id not in `used`. Only needed once ids reach
/// `TaskId::MAX` and can no longer be bumped.
pub fn lowest_free_id(used: impl IntoIterator<Item = TaskId>) -> TaskId {
    let used: HashSet<TaskId> = used.into_iter().collect();
    (1..=TaskId::MAX)
        .find(|id| !used.contains(id))
        .unwrap_or(TaskId::MAX)
}
