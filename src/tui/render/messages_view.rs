use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::view::compose::ViewModel;

/// Render the project messages tab as a chat transcript, oldest first.
/// The viewer's own messages are right-aligned.
pub fn render_messages_view(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    if vm.messages.is_empty() {
        let empty = Paragraph::new(" No messages yet. Press m to compose.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let bubble_width = (width.saturating_sub(6)).clamp(10, 60);
    let mut lines: Vec<Line> = Vec::new();

    for message in &vm.messages {
        let fg = if message.from_me {
            app.theme.text_bright
        } else {
            app.theme.text
        };
        let time_line = format!("[{}]", message.sent_at);
        let rows = unicode::wrap_text(&message.content, bubble_width);

        if message.from_me {
            lines.push(right_aligned(app, &time_line, width, app.theme.dim));
            for row in &rows {
                lines.push(right_aligned(app, row, width, fg));
            }
        } else {
            lines.push(Line::from(Span::styled(
                format!(" {}", time_line),
                Style::default().fg(app.theme.dim).bg(bg),
            )));
            for row in &rows {
                lines.push(Line::from(Span::styled(
                    format!(" {}", row),
                    Style::default().fg(fg).bg(bg),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    // Keep the newest messages in view
    let visible = area.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let paragraph =
        Paragraph::new(lines[skip..].to_vec()).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn right_aligned(
    app: &App,
    text: &str,
    width: usize,
    fg: ratatui::style::Color,
) -> Line<'static> {
    let bg = app.theme.background;
    let text_width = unicode::display_width(text);
    let padding = width.saturating_sub(text_width + 1);
    Line::from(vec![
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(text.to_string(), Style::default().fg(fg).bg(bg)),
    ])
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::tui::render::test_helpers::*;

    #[test]
    fn messages_empty() {
        let mut app = app_in_project();
        if let crate::tui::app::Screen::Project(screen) = &mut app.screen {
            screen.messages.clear();
        }
        let vm = app.view_model().unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_messages_view(frame, &app, &vm, area);
        });
        assert_snapshot!(output, @" No messages yet. Press m to compose.");
    }

    #[test]
    fn messages_transcript_aligns_own_messages_right() {
        let app = app_in_project();
        let vm = app.view_model().unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_messages_view(frame, &app, &vm, area);
        });
        let other = output
            .lines()
            .find(|l| l.contains("Mockups are ready"))
            .unwrap();
        let mine = output
            .lines()
            .find(|l| l.contains("Looking now"))
            .unwrap();
        // Other people's messages hug the left edge, the viewer's the right
        assert!(other.starts_with(' '));
        assert_eq!(other.trim_start(), "Mockups are ready for review");
        assert!(mine.len() > 60);
        assert!(mine.trim_end().ends_with("Looking now, thanks"));
        // Chronological, oldest first
        let first = output.find("Mockups are ready").unwrap();
        let second = output.find("Looking now").unwrap();
        assert!(first < second);
    }
}
