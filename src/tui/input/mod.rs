mod add;
mod confirm;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::TaskStorage;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key<S: TaskStorage>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Add => add::handle_add(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}
