use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::view::compose::ViewModel;
use crate::view::progress::ProgressSummary;

use super::helpers::progress_bar;

const BAR_WIDTH: usize = 24;

/// Render the dashboard progress tab: one bar per project
pub fn render_dashboard_progress(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.projects.is_empty() {
        let empty = Paragraph::new(" No projects")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let title_width = app
        .projects
        .iter()
        .map(|p| p.title.chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    let mut lines: Vec<Line> = Vec::new();
    for project in &app.projects {
        let progress = app
            .dashboard_tasks
            .get(&project.id)
            .map(|tasks| ProgressSummary::from_tasks(tasks))
            .unwrap_or_else(|| ProgressSummary::new(0, 0));

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<width$}  ", project.title, width = title_width),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(
                progress_bar(progress.percentage, BAR_WIDTH),
                Style::default().fg(app.theme.highlight).bg(bg),
            ),
            Span::styled(
                format!(
                    " {:>3}%  {}/{}",
                    progress.percentage, progress.completed, progress.total
                ),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the project progress tab: the bar plus every task with its state
pub fn render_project_progress(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!(" {}", progress_bar(vm.progress.percentage, BAR_WIDTH)),
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!(
                " {}%  {}/{} tasks completed",
                vm.progress.percentage, vm.progress.completed, vm.progress.total
            ),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ]));
    lines.push(Line::from(""));

    for entry in &vm.timeline {
        let display = entry.status.display();
        let color = app.theme.status_color(entry.status);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", display.glyph),
                Style::default().fg(color).bg(bg),
            ),
            Span::styled(
                entry.title.clone(),
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(
                format!("  [{}]", display.label),
                Style::default().fg(color).bg(bg),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::*;

    #[test]
    fn dashboard_progress() {
        let app = app_with_projects();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_dashboard_progress(frame, &app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Site redesign"));
        assert!(lines[0].contains("50%  1/2"));
        assert!(lines[1].contains("Mobile app"));
        assert!(lines[1].contains("0%  0/0"));
        // Half the bar cells are filled
        assert_eq!(
            lines[0].chars().filter(|&c| c == '\u{2588}').count(),
            super::BAR_WIDTH / 2
        );
    }

    #[test]
    fn project_progress() {
        let app = app_in_project();
        let vm = app.view_model().unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_project_progress(frame, &app, &vm, area);
        });
        assert!(output.contains("50%  1/2 tasks completed"));
        assert!(output.contains("Build pages"));
        assert!(output.contains("[Completed]"));
    }
}
