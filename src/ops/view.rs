use chrono::NaiveDate;

use crate::model::filter::Filter;
use crate::model::task::Task;

/// Collection-wide tallies, independent of the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
    pub done: usize,
}

impl Counts {
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|t| t.done).count();
        Counts {
            total,
            active: total - done,
            done,
        }
    }

    /// Counts are only shown once there is something to count
    pub fn is_visible(&self) -> bool {
        self.total > 0
    }
}

/// A task as it should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskView<'a> {
    pub task: &'a Task,
    pub is_overdue: bool,
}

/// Render-ready projection of the collection under a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel<'a> {
    pub filter: Filter,
    pub items: Vec<TaskView<'a>>,
    pub counts: Counts,
    /// Set only when `items` is empty
    pub empty_message: Option<&'static str>,
}

/// Message shown in place of an empty list
pub fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Add one now!",
        Filter::Active => "No active tasks!",
        Filter::Done => "No completed tasks yet.",
    }
}

/// Project `tasks` through `filter` as of `today`. Pure: equal inputs give
/// equal output, and source order is preserved.
pub fn project(tasks: &[Task], filter: Filter, today: NaiveDate) -> ViewModel<'_> {
    let items: Vec<TaskView<'_>> = tasks
        .iter()
        .filter(|t| filter.matches(t.done))
        .map(|task| TaskView {
            task,
            is_overdue: task.is_overdue(today),
        })
        .collect();
    let empty_message = items.is_empty().then(|| empty_message(filter));
    ViewModel {
        filter,
        items,
        counts: Counts::of(tasks),
        empty_message,
    }
}
