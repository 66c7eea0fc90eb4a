use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStorage;
use crate::model::config::UiConfig;
use crate::model::task::Task;
use crate::ops::store::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Date the sample app treats as today
pub fn sample_today() -> NaiveDate {
    date("2025-06-10")
}

/// Newest first: one upcoming, one done, one overdue
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 3,
            text: "Buy &lt;milk&gt; &amp; eggs".into(),
            date: date("2025-06-20"),
            done: false,
        },
        Task {
            id: 2,
            text: "File taxes".into(),
            date: date("2025-04-01"),
            done: true,
        },
        Task {
            id: 1,
            text: "Call mom".into(),
            date: date("2025-05-01"),
            done: false,
        },
    ]
}

pub fn app_with(tasks: Vec<Task>) -> App<MemoryStorage> {
    let store = TaskStore::open(MemoryStorage::with_tasks(tasks));
    App::new(store, UiConfig::default(), sample_today())
}

pub fn sample_app() -> App<MemoryStorage> {
    app_with(sample_tasks())
}
