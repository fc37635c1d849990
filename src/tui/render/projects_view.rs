use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;
use crate::view::progress::ProgressSummary;

use super::helpers::progress_bar;
use super::push_highlighted_spans;

const BAR_WIDTH: usize = 12;

/// Render the dashboard project list
pub fn render_projects_view(frame: &mut Frame, app: &App, area: Rect) {
    let projects = app.visible_projects();

    if projects.is_empty() {
        let text = if app.projects.is_empty() {
            " No projects yet. Create one with: kly new \"Title\""
        } else {
            " No projects match the filter"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let cursor = app.projects_cursor.min(projects.len() - 1);
    let search_re = app.active_search_re();
    let mut lines: Vec<Line> = Vec::new();

    for (i, project) in projects.iter().enumerate() {
        let is_cursor = i == cursor;
        let bg = if is_cursor {
            app.theme.selection_bg
        } else {
            app.theme.background
        };
        let display = project.status.display();
        let status_color = app.theme.status_color(project.status);
        let progress = app
            .dashboard_tasks
            .get(&project.id)
            .map(|tasks| ProgressSummary::from_tasks(tasks))
            .unwrap_or_else(|| ProgressSummary::new(0, 0));

        let mut spans: Vec<Span> = Vec::new();
        spans.push(Span::styled(
            format!(" {} ", display.glyph),
            Style::default().fg(status_color).bg(bg),
        ));

        let title_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let highlight_style = Style::default()
            .fg(app.theme.search_match_fg)
            .bg(app.theme.search_match_bg);
        // Keep the status label, bar, and percentage on screen even for
        // very long titles
        let tail_width = display.label.len() + 4 + BAR_WIDTH + 5;
        let title_budget = (area.width as usize).saturating_sub(3 + tail_width).max(10);
        let title = unicode::truncate_to_width(&project.title, title_budget);
        push_highlighted_spans(
            &mut spans,
            &title,
            title_style,
            highlight_style,
            search_re.as_ref(),
        );

        spans.push(Span::styled(
            format!("  [{}]  ", display.label),
            Style::default().fg(status_color).bg(bg),
        ));
        spans.push(Span::styled(
            progress_bar(progress.percentage, BAR_WIDTH),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            format!(" {:>3}%", progress.percentage),
            Style::default().fg(app.theme.text).bg(bg),
        ));

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}
