use serde::Serialize;

use crate::model::filter::Filter;
use crate::model::task::Task;
use crate::ops::view::{Counts, TaskView, ViewModel};
use crate::util::date::format_date;
use crate::util::html::{strip_control, unescape_html};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    /// Display text (stored entities decoded)
    pub text: String,
    pub date: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue: Option<bool>,
}

#[derive(Serialize)]
pub struct CountsJson {
    pub total: usize,
    pub active: usize,
    pub done: usize,
}

#[derive(Serialize)]
pub struct ListJson {
    pub filter: Filter,
    pub tasks: Vec<TaskJson>,
    pub counts: CountsJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        text: unescape_html(&task.text),
        date: task.date.to_string(),
        done: task.done,
        overdue: None,
    }
}

pub fn counts_to_json(counts: &Counts) -> CountsJson {
    CountsJson {
        total: counts.total,
        active: counts.active,
        done: counts.done,
    }
}

pub fn view_to_json(view: &ViewModel) -> ListJson {
    ListJson {
        filter: view.filter,
        tasks: view
            .items
            .iter()
            .map(|item| TaskJson {
                overdue: Some(item.is_overdue),
                ..task_to_json(item.task)
            })
            .collect(),
        counts: counts_to_json(&view.counts),
        empty_message: view.empty_message,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One list row: `[x] <id>  <text>  (due 01 Jun 2025)`
pub fn format_task_line(item: &TaskView) -> String {
    let check = if item.task.done { "[x]" } else { "[ ]" };
    let due = format_date(item.task.date);
    let label = if item.is_overdue {
        format!("overdue {}", due)
    } else {
        format!("due {}", due)
    };
    format!(
        "{} {}  {}  ({})",
        check,
        item.task.id,
        strip_control(&unescape_html(&item.task.text)),
        label
    )
}

pub fn format_counts(counts: &Counts) -> String {
    format!(
        "{} total, {} active, {} done",
        counts.total, counts.active, counts.done
    )
}

/// Full `peto list` text: rows (or the empty message), then counts if any
pub fn format_view(view: &ViewModel) -> String {
    let mut out = String::new();
    match view.empty_message {
        Some(msg) => {
            out.push_str(msg);
            out.push('\n');
        }
        None => {
            for item in &view.items {
                out.push_str(&format_task_line(item));
                out.push('\n');
            }
        }
    }
    if view.counts.is_visible() {
        out.push('\n');
        out.push_str(&format_counts(&view.counts));
        out.push('\n');
    }
    out
}
