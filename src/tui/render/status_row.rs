use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::TaskStorage;
use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen): the toast if one is up,
/// otherwise key hints for the current mode
pub fn render_status_row<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;

    let line = match &app.toast {
        Some(toast) => Line::from(Span::styled(
            format!(" {}", toast.notice.message),
            Style::default()
                .fg(app.theme.notice_color(toast.notice.kind))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(" {}", hints(app.mode)),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "a add  space toggle  d delete  D delete all  1/2/3 filter  t theme  q quit"
        }
        Mode::Add => "Enter next/save  Tab switch field  Esc cancel",
        Mode::Confirm => "y confirm  n cancel",
    }
}
