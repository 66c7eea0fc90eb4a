use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::storage::TaskStorage;
use crate::tui::app::{AddField, App};

const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

/// Bordered two-field form for a new task
pub fn render_add_form<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let form = &app.form;

    let label_style = |focused: bool| {
        if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        }
    };
    let value_style = Style::default().fg(theme.text_bright).bg(bg);
    let cursor = Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg));

    let text_focused = form.field == AddField::Text;
    let mut spans = vec![
        Span::styled(" Task ", label_style(text_focused)),
        Span::styled(form.text.clone(), value_style),
    ];
    if text_focused {
        spans.push(cursor.clone());
    }

    spans.push(Span::styled("   Due ", label_style(!text_focused)));
    if form.date.is_empty() && text_focused {
        spans.push(Span::styled(
            DATE_PLACEHOLDER,
            Style::default().fg(theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(form.date.clone(), value_style));
    }
    if !text_focused {
        spans.push(cursor);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " New task ",
            Style::default().fg(theme.highlight).bg(bg),
        ))
        .border_style(Style::default().fg(theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
