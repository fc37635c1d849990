mod compose;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // Any key clears a one-shot notice
    app.notice = None;

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Search => search::handle_search(app, key),
        Mode::Compose => compose::handle_compose(app, key),
    }
}
