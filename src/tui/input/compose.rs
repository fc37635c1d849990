use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

pub(super) fn handle_compose(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = Mode::Navigate;
            app.compose_input.clear();
            app.compose_cursor = 0;
        }
        (_, KeyCode::Enter) => app.send_compose(),
        (_, KeyCode::Backspace) => {
            if let Some(start) =
                unicode::prev_grapheme_boundary(&app.compose_input, app.compose_cursor)
            {
                app.compose_input.replace_range(start..app.compose_cursor, "");
                app.compose_cursor = start;
            }
        }
        (_, KeyCode::Left) => {
            if let Some(start) =
                unicode::prev_grapheme_boundary(&app.compose_input, app.compose_cursor)
            {
                app.compose_cursor = start;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) =
                unicode::next_grapheme_boundary(&app.compose_input, app.compose_cursor)
            {
                app.compose_cursor = next;
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.compose_input.replace_range(..app.compose_cursor, "");
            app.compose_cursor = 0;
        }
        (_, KeyCode::Home) => app.compose_cursor = 0,
        (_, KeyCode::End) => app.compose_cursor = app.compose_input.len(),
        (_, KeyCode::Char(c)) => {
            app.compose_input.insert(app.compose_cursor, c);
            app.compose_cursor += c.len_utf8();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::tui::app::{App, Mode};
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn compose_app() -> App {
        let mut app = app_in_project();
        app.mode = Mode::Compose;
        app
    }

    #[test]
    fn typing_and_backspace() {
        let mut app = compose_app();
        for c in "héllo".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.compose_input, "héllo");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.compose_input, "hél");
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut app = compose_app();
        // Family emoji is several codepoints joined by ZWJ
        app.compose_input = "hi \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}".to_string();
        app.compose_cursor = app.compose_input.len();
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.compose_input, "hi ");
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut app = compose_app();
        app.compose_input = "aé".to_string();
        app.compose_cursor = app.compose_input.len();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.compose_cursor, 1);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.compose_cursor, app.compose_input.len());
    }

    #[test]
    fn esc_discards_draft() {
        let mut app = compose_app();
        app.compose_input = "draft".into();
        app.compose_cursor = 5;
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.compose_input, "");
    }

    #[test]
    fn enter_on_empty_draft_does_nothing() {
        let mut app = compose_app();
        press(&mut app, KeyCode::Enter);
        // Still composing, nothing sent
        assert_eq!(app.mode, Mode::Compose);
    }
}
