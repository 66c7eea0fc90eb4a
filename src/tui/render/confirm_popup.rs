use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::storage::TaskStorage;
use crate::tui::app::App;

/// Render the delete-all confirmation over the list
pub fn render_confirm_popup<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let popup_w: u16 = 36.min(area.width.saturating_sub(2));
    let popup_h: u16 = 5.min(area.height);

    let bg = app.theme.background;
    let count = app.store.len();
    let noun = if count == 1 { "task" } else { "tasks" };

    let lines = vec![
        Line::from(Span::styled(
            format!(" Delete all {} {}?", count, noun),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(" y", Style::default().fg(app.theme.red).bg(bg)),
            Span::styled(" yes   ", Style::default().fg(app.theme.text).bg(bg)),
            Span::styled("n", Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(" no", Style::default().fg(app.theme.text).bg(bg)),
        ]),
    ];

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
