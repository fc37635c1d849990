use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, Screen};
use crate::view::tabs::Tab;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Tab cycling works on both screens
        (_, KeyCode::Tab) | (_, KeyCode::Char('l')) | (_, KeyCode::Right) => {
            current_tabs(app).next();
        }
        (_, KeyCode::BackTab) | (_, KeyCode::Char('h')) | (_, KeyCode::Left) => {
            current_tabs(app).prev();
        }
        (_, KeyCode::Char(c @ '1'..='9')) => {
            let index = c as usize - '1' as usize;
            current_tabs(app).select_index(index);
        }

        (_, KeyCode::Char('r')) => app.reload(),

        _ => match app.screen {
            Screen::Projects => handle_dashboard(app, key),
            Screen::Project(_) => handle_project(app, key),
        },
    }
}

fn current_tabs(app: &mut App) -> &mut crate::view::tabs::TabController {
    match &mut app.screen {
        Screen::Projects => &mut app.dashboard_tabs,
        Screen::Project(screen) => &mut screen.tabs,
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    let count = app.visible_projects().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.projects_cursor + 1 < count {
                app.projects_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.projects_cursor = app.projects_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.projects_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.projects_cursor = count.saturating_sub(1);
        }
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            app.search_input.clear();
        }
        KeyCode::Esc => {
            // Clear an active filter
            app.last_search = None;
            app.projects_cursor = 0;
        }
        _ => {}
    }
}

fn handle_project(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('p') => app.close_project(),
        KeyCode::Char('m') => {
            // Compose from anywhere in the project; jump to the transcript
            if let Screen::Project(screen) = &mut app.screen {
                let _ = screen.tabs.select(Tab::Messages);
            }
            app.mode = Mode::Compose;
        }
        _ => {}
    }
}
