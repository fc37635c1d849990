use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, Screen};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Search => prompt_line(app, width, format!("/{}", app.search_input), "Enter filter  Esc cancel"),
        Mode::Compose => prompt_line(app, width, format!("> {}", app.compose_input), "Enter send  Esc cancel"),
        Mode::Navigate => {
            if let Some(ref notice) = app.notice {
                Line::from(Span::styled(
                    format!(" {}", notice),
                    Style::default().fg(app.theme.highlight).bg(bg),
                ))
            } else if let Some(ref pattern) = app.last_search {
                Line::from(Span::styled(
                    format!("/{}", pattern),
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else if app.workspace.config.ui.show_key_hints {
                let hint = match app.screen {
                    Screen::Projects => "j/k move  Enter open  Tab next  / filter  q quit",
                    Screen::Project(_) => "Tab next  1-5 tabs  m compose  Esc back  q quit",
                };
                Line::from(Span::styled(
                    format!(" {}", hint),
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// An input prompt with a block cursor and a right-aligned hint.
fn prompt_line(app: &App, width: usize, input: String, hint: &'static str) -> Line<'static> {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(input, Style::default().fg(app.theme.text_bright).bg(bg)),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
    ];
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}
