use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::TaskStorage;
use crate::ops::view::TaskView;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::date::format_date;
use crate::util::html::{strip_control, unescape_html};
use crate::util::unicode::{display_width, pad_to_width};

/// Render the filtered task list, or its empty message
pub fn render_task_list<S: TaskStorage>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let height = area.height as usize;
    let count = app.view().items.len();
    adjust_scroll(&mut app.scroll_offset, app.cursor, count, height);

    let theme = &app.theme;
    let bg = theme.background;
    let view = app.view();

    let lines: Vec<Line> = match view.empty_message {
        Some(msg) => vec![
            Line::default(),
            Line::from(Span::styled(
                format!("   {}", msg),
                Style::default().fg(theme.dim).bg(bg),
            )),
        ],
        None => view
            .items
            .iter()
            .enumerate()
            .skip(app.scroll_offset)
            .take(height)
            .map(|(i, item)| task_line(item, i == app.cursor, theme, area.width as usize))
            .collect(),
    };

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// Keep `cursor` within the visible window of `height` rows
fn adjust_scroll(offset: &mut usize, cursor: usize, count: usize, height: usize) {
    if height == 0 || count == 0 {
        *offset = 0;
        return;
    }
    if cursor < *offset {
        *offset = cursor;
    } else if cursor >= *offset + height {
        *offset = cursor + 1 - height;
    }
    *offset = (*offset).min(count.saturating_sub(height));
}

fn task_line<'a>(item: &TaskView, selected: bool, theme: &Theme, width: usize) -> Line<'a> {
    let row_bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let task = item.task;

    let pointer = if selected { " \u{25B8} " } else { "   " };
    let check = if task.done { "[x] " } else { "[ ] " };
    let (due, due_color) = if item.is_overdue {
        (format!("  overdue {} ", format_date(task.date)), theme.red)
    } else {
        (format!("  due {} ", format_date(task.date)), theme.dim)
    };

    let fixed = display_width(pointer) + display_width(check) + display_width(&due);
    let text_w = width.saturating_sub(fixed);
    let text = pad_to_width(&strip_control(&unescape_html(&task.text)), text_w);

    let mut text_style = Style::default().fg(theme.text).bg(row_bg);
    if task.done {
        text_style = text_style
            .fg(theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
    } else if selected {
        text_style = text_style.fg(theme.text_bright);
    }
    let check_color = if task.done { theme.green } else { theme.text };

    Line::from(vec![
        Span::styled(pointer, Style::default().fg(theme.highlight).bg(row_bg)),
        Span::styled(check, Style::default().fg(check_color).bg(row_bg)),
        Span::styled(text, text_style),
        Span::styled(due, Style::default().fg(due_color).bg(row_bg)),
    ])
}
