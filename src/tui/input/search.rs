use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
        }
        KeyCode::Enter => {
            app.last_search = if app.search_input.is_empty() {
                None
            } else {
                Some(app.search_input.clone())
            };
            app.mode = Mode::Navigate;
            app.search_input.clear();
            app.projects_cursor = 0;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.projects_cursor = 0;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut crate::tui::app::App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn search_filters_dashboard() {
        let mut app = app_with_projects();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Search);
        for c in "mobile".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // Filter applies while typing
        assert_eq!(app.visible_projects().len(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.last_search.as_deref(), Some("mobile"));
        assert_eq!(app.visible_projects().len(), 1);
        assert_eq!(app.visible_projects()[0].title, "Mobile app");
    }

    #[test]
    fn esc_cancels_without_committing() {
        let mut app = app_with_projects();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.last_search, None);
        assert_eq!(app.visible_projects().len(), 2);
    }

    #[test]
    fn invalid_pattern_falls_back_to_literal() {
        let mut app = app_with_projects();
        app.last_search = Some("redesign(".into());
        // Escaped literal matches nothing, but does not panic
        assert_eq!(app.visible_projects().len(), 0);
    }
}
