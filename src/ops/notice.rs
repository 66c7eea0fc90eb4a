use crate::ops::store::{ClearOutcome, StoreError, ValidationError};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Short message reporting the outcome of a store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Notice {
            kind,
            message: message.into(),
        }
    }

    pub fn added() -> Self {
        Notice::new(NoticeKind::Success, "Task added!")
    }

    pub fn deleted() -> Self {
        Notice::new(NoticeKind::Success, "Task deleted.")
    }

    /// `None` for a declined clear: nothing happened, nothing to say
    pub fn cleared(outcome: ClearOutcome) -> Option<Self> {
        match outcome {
            ClearOutcome::Cleared(_) => Some(Notice::new(NoticeKind::Success, "All tasks deleted.")),
            ClearOutcome::Declined => None,
        }
    }

    pub fn from_error(err: &StoreError) -> Self {
        match err {
            StoreError::Validation(ValidationError::InvalidDate(_)) => {
                Notice::new(NoticeKind::Warning, "Use a due date like 2025-06-01 (YYYY-MM-DD).")
            }
            StoreError::Validation(_) => {
                Notice::new(NoticeKind::Warning, "Enter a task and pick a due date first!")
            }
            StoreError::NothingToClear => {
                Notice::new(NoticeKind::Warning, "There are no tasks to delete.")
            }
            StoreError::Persist(e) => Notice::new(NoticeKind::Error, format!("Save failed: {}", e)),
        }
    }
}
