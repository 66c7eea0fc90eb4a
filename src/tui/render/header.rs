use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::TaskStorage;
use crate::model::filter::Filter;
use crate::ops::view::Counts;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Title row plus the filter tabs
pub fn render_header<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
}

fn render_title<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(" \u{25B6} ", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            "peto",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    // Theme indicator, right-aligned
    let mode = format!("{} ", app.theme_mode);
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let mode_w = display_width(&mode);
    if used + mode_w < width {
        spans.push(Span::styled(
            " ".repeat(width - used - mode_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(mode, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let current = app.filter.current();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, filter) in Filter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(sep.clone());
        }
        let style = if *filter == current {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, filter.label()), style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

/// Collection-wide tallies; only called when there is at least one task
pub fn render_counts<S: TaskStorage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let Counts {
        total,
        active,
        done,
    } = Counts::of(app.store.tasks());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} total", total),
            Style::default().fg(app.theme.text).bg(bg),
        ),
        Span::styled(", ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            format!("{} active", active),
            Style::default().fg(app.theme.yellow).bg(bg),
        ),
        Span::styled(", ", Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled(
            format!("{} done", done),
            Style::default().fg(app.theme.green).bg(bg),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::ThemeMode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_lists_filters_and_theme() {
        let app = sample_app();
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(out.contains("peto"));
        assert!(out.contains("light"));
        assert!(out.contains("1 All"));
        assert!(out.contains("2 Active"));
        assert!(out.contains("3 Done"));
    }

    #[test]
    fn header_shows_dark_mode() {
        let mut app = sample_app();
        app.toggle_theme();
        assert_eq!(app.theme_mode, ThemeMode::Dark);
        let out = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(out.contains("dark"));
    }

    #[test]
    fn counts_line() {
        let app = sample_app();
        let out = render_to_string(TERM_W, 1, |frame, area| {
            render_counts(frame, &app, area);
        });
        assert_eq!(out, " 3 total, 2 active, 1 done");
    }
}
