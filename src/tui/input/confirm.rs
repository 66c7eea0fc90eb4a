use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::TaskStorage;
use crate::ops::notice::Notice;
use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm<S: TaskStorage>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.mode = Mode::Navigate;
            // The prompt was the confirmation
            match app.store.clear(|_| true) {
                Ok(outcome) => {
                    if let Some(notice) = Notice::cleared(outcome) {
                        app.notify(notice);
                    }
                }
                Err(e) => app.notify_error(&e),
            }
            app.clamp_cursor();
            app.scroll_offset = 0;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
