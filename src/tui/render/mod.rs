pub mod add_form;
pub mod confirm_popup;
pub mod header;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::storage::TaskStorage;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render<S: TaskStorage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let counts_h = if app.view().counts.is_visible() { 1 } else { 0 };
    let form_h = if app.mode == Mode::Add { 3 } else { 0 };

    // Layout: header (2 rows) | counts | list | add form | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(counts_h),
            Constraint::Min(1),
            Constraint::Length(form_h),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    if counts_h > 0 {
        header::render_counts(frame, app, chunks[1]);
    }
    task_list::render_task_list(frame, app, chunks[2]);
    if form_h > 0 {
        add_form::render_add_form(frame, app, chunks[3]);
    }
    status_row::render_status_row(frame, app, chunks[4]);

    // Confirm popup (rendered on top of everything)
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
}
