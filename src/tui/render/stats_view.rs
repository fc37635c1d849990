use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Status, Task};
use crate::tui::app::{App, ProjectScreen};

fn count(tasks: &[Task], status: Status) -> usize {
    tasks.iter().filter(|t| t.status == status).count()
}

/// Spans for a per-status count row like `2○ 3◐ 5✓`
fn count_spans<'a>(app: &App, tasks: &[Task]) -> Vec<Span<'a>> {
    let bg = app.theme.background;
    let mut spans = Vec::new();
    for status in Status::ALL {
        let display = status.display();
        spans.push(Span::styled(
            format!("{:>3}", count(tasks, status)),
            Style::default().fg(app.theme.text).bg(bg),
        ));
        spans.push(Span::styled(
            format!("{} ", display.glyph),
            Style::default().fg(app.theme.status_color(status)).bg(bg),
        ));
    }
    spans
}

/// Render the dashboard statistics tab: task counts per project
pub fn render_dashboard_stats(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.projects.is_empty() {
        let empty = Paragraph::new(" No projects")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut all_tasks: Vec<Task> = Vec::new();

    for project in &app.projects {
        let tasks = app
            .dashboard_tasks
            .get(&project.id)
            .cloned()
            .unwrap_or_default();
        let mut spans = vec![Span::styled(" ".to_string(), Style::default().bg(bg))];
        spans.extend(count_spans(app, &tasks));
        spans.push(Span::styled(
            format!("  {}", project.title),
            Style::default().fg(app.theme.text).bg(bg),
        ));
        lines.push(Line::from(spans));
        all_tasks.extend(tasks);
    }

    lines.push(Line::from(""));
    let mut total_spans = vec![Span::styled(" ".to_string(), Style::default().bg(bg))];
    total_spans.extend(count_spans(app, &all_tasks));
    total_spans.push(Span::styled(
        "  total".to_string(),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(total_spans));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the project statistics tab: this project's counts by status
pub fn render_project_stats(frame: &mut Frame, app: &App, screen: &ProjectScreen, area: Rect) {
    let bg = app.theme.background;
    let total = screen.tasks.len();
    let mut lines: Vec<Line> = Vec::new();

    for status in Status::ALL {
        let display = status.display();
        let color = app.theme.status_color(status);
        let n = count(&screen.tasks, status);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", display.glyph),
                Style::default().fg(color).bg(bg),
            ),
            Span::styled(
                format!("{:<12}", display.label),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(
                format!("{:>4}", n),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {:<12}{:>4}", "total", total),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::*;

    #[test]
    fn dashboard_stats() {
        let app = app_with_projects();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_dashboard_stats(frame, &app, area);
        });
        assert!(output.contains("Site redesign"));
        assert!(output.contains("Mobile app"));
        assert!(output.contains("total"));
        // One completed task across the workspace
        let total_line = output.lines().last().unwrap();
        assert!(total_line.contains("1\u{2713}"));
        assert!(total_line.contains("1\u{25D0}"));
    }

    #[test]
    fn project_stats_counts_by_status() {
        let app = app_in_project();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            if let crate::tui::app::Screen::Project(screen) = &app.screen {
                super::render_project_stats(frame, &app, screen, area);
            }
        });
        assert!(output.contains("Pending"));
        assert!(output.contains("Completed"));
        assert!(output.contains("Live"));
        assert!(output.lines().last().unwrap().contains("total"));
    }
}
