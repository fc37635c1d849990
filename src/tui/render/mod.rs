pub mod helpers;
pub mod messages_view;
pub mod overview;
pub mod progress_view;
pub mod projects_view;
pub mod stats_view;
pub mod status_row;
pub mod tab_bar;
pub mod timeline_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use crate::view::tabs::Tab;

use super::app::{App, Screen};

/// Top-level render dispatch for the current screen and tab.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match &app.screen {
        Screen::Projects => match app.dashboard_tabs.current() {
            Tab::Progress => progress_view::render_dashboard_progress(frame, app, chunks[1]),
            Tab::Timeline => timeline_view::render_dashboard_timeline(frame, app, chunks[1]),
            Tab::Statistics => stats_view::render_dashboard_stats(frame, app, chunks[1]),
            _ => projects_view::render_projects_view(frame, app, chunks[1]),
        },
        Screen::Project(screen) => {
            let vm = crate::view::compose::compose(
                &screen.project,
                &screen.tasks,
                &screen.messages,
                app.viewer.as_deref(),
                screen.tabs.current(),
            );
            match vm.active_tab {
                Tab::Progress => {
                    progress_view::render_project_progress(frame, app, &vm, chunks[1])
                }
                Tab::Timeline => {
                    timeline_view::render_project_timeline(frame, app, &vm, chunks[1])
                }
                Tab::Statistics => {
                    stats_view::render_project_stats(frame, app, screen, chunks[1])
                }
                Tab::Messages => {
                    messages_view::render_messages_view(frame, app, &vm, chunks[1])
                }
                _ => overview::render_overview(frame, app, &vm, chunks[1]),
            }
        }
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no
/// matches, pushes a single span with `base_style`.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
