use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::TaskStorage;
use crate::ops::notice::Notice;
use crate::ops::store::StoreError;
use crate::tui::app::{AddField, AddForm, App, Mode};

pub(super) fn handle_add<S: TaskStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.form = AddForm::default();
            app.mode = Mode::Navigate;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.form.field = match app.form.field {
                AddField::Text => AddField::Date,
                AddField::Date => AddField::Text,
            };
        }
        KeyCode::Enter => match app.form.field {
            AddField::Text => app.form.field = AddField::Date,
            AddField::Date => submit(app),
        },
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) => app.form.focused_mut().push(c),
        _ => {}
    }
}

fn submit<S: TaskStorage>(app: &mut App<S>) {
    let text = app.form.text.clone();
    let date = app.form.date.clone();
    match app.store.add(&text, &date) {
        Ok(_) => {
            app.notify(Notice::added());
            finish(app);
        }
        // Keep the form so the input can be corrected
        Err(e @ StoreError::Validation(_)) => app.notify_error(&e),
        // Added in memory but not saved: report and carry on
        Err(e) => {
            app.notify_error(&e);
            finish(app);
        }
    }
}

fn finish<S: TaskStorage>(app: &mut App<S>) {
    app.form = AddForm::default();
    app.mode = Mode::Navigate;
    // New tasks land on top
    app.cursor = 0;
    app.scroll_offset = 0;
}
