use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::TaskStorage;
use crate::model::filter::Filter;
use crate::ops::notice::Notice;
use crate::ops::store::StoreError;
use crate::tui::app::{AddForm, App, Mode};

pub(super) fn handle_navigate<S: TaskStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Movement
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.view().items.len().saturating_sub(1);
        }

        // Mutations
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.form = AddForm::default();
            app.mode = Mode::Add;
        }
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => toggle_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        KeyCode::Char('D') => request_clear(app),

        // Filters
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Active),
        KeyCode::Char('3') => app.set_filter(Filter::Done),
        KeyCode::Tab => {
            let next = app.filter.current().next();
            app.set_filter(next);
        }

        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
}

fn move_cursor<S: TaskStorage>(app: &mut App<S>, delta: isize) {
    let count = app.view().items.len();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(count - 1);
}

fn toggle_selected<S: TaskStorage>(app: &mut App<S>) {
    let Some(id) = app.selected_id() else {
        return;
    };
    if let Err(e) = app.store.toggle(id) {
        app.notify_error(&e);
    }
    // The task may have left the filtered list
    app.clamp_cursor();
}

fn delete_selected<S: TaskStorage>(app: &mut App<S>) {
    let Some(id) = app.selected_id() else {
        return;
    };
    match app.store.delete(id) {
        Ok(Some(_)) => app.notify(Notice::deleted()),
        Ok(None) => {}
        Err(e) => app.notify_error(&e),
    }
    app.clamp_cursor();
}

/// Prompt before deleting everything; an empty list only gets a warning
fn request_clear<S: TaskStorage>(app: &mut App<S>) {
    if app.store.is_empty() {
        app.notify_error(&StoreError::NothingToClear);
        return;
    }
    app.mode = Mode::Confirm;
}
