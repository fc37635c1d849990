use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::view::compose::ViewModel;

use super::helpers::progress_bar;

/// Render the project overview tab: status, dates, description,
/// progress, and a short message preview.
pub fn render_overview(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let status_color = app.theme.status_color(vm.status);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", vm.status_display.glyph),
            Style::default().fg(status_color).bg(bg),
        ),
        Span::styled(
            vm.status_display.label,
            Style::default()
                .fg(status_color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {}  \u{2192}  {}", vm.start_date, vm.end_date),
            dim,
        ),
    ]));
    lines.push(Line::from(""));

    let wrap_width = (area.width as usize).saturating_sub(2).max(10);
    for row in unicode::wrap_text(&vm.description, wrap_width) {
        lines.push(Line::from(Span::styled(format!(" {}", row), text)));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled(" Progress  ", dim),
        Span::styled(
            progress_bar(vm.progress.percentage, 20),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!(
                " {}%  ({}/{} tasks)",
                vm.progress.percentage, vm.progress.completed, vm.progress.total
            ),
            text,
        ),
    ]));

    let recent = vm.recent_messages();
    if !recent.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Recent messages", dim)));
        for message in recent {
            let marker = if message.from_me { ">" } else { " " };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), dim),
                Span::styled(format!("[{}] ", message.sent_at), dim),
                Span::styled(message.content.clone(), bright),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
