use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::view::compose::ViewModel;
use crate::view::timeline;

/// Render the dashboard timeline tab: each project with its date range
pub fn render_dashboard_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    if app.projects.is_empty() {
        let empty = Paragraph::new(" No projects")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for project in &app.projects {
        let display = project.status.display();
        let color = app.theme.status_color(project.status);
        let end = project
            .end_date
            .map(timeline::format_date)
            .unwrap_or_else(|| timeline::UNSCHEDULED.to_string());
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", display.glyph),
                Style::default().fg(color).bg(bg),
            ),
            Span::styled(
                project.title.clone(),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "   {}  \u{2192}  {}",
                timeline::format_date(project.start_date),
                end
            ),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the project timeline tab: tasks as dated milestones, in the
/// order the projection emits them.
pub fn render_project_timeline(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;

    if vm.timeline.is_empty() {
        let empty = Paragraph::new(" No tasks")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let last = vm.timeline.len() - 1;
    for (i, entry) in vm.timeline.iter().enumerate() {
        let display = entry.status.display();
        let color = app.theme.status_color(entry.status);

        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", display.glyph),
                Style::default().fg(color).bg(bg),
            ),
            Span::styled(
                entry.title.clone(),
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", display.label),
                Style::default().fg(color).bg(bg),
            ),
        ]));

        let stem = if i == last { " " } else { "\u{2502}" };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", stem),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
            Span::styled(
                entry.date.clone(),
                Style::default().fg(app.theme.text).bg(bg),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", stem),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
            Span::styled(
                entry.description.clone(),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]));
        if i != last {
            lines.push(Line::from(Span::styled(
                " \u{2502}",
                Style::default().fg(app.theme.dim).bg(bg),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use crate::tui::render::test_helpers::*;

    #[test]
    fn dashboard_timeline() {
        let app = app_with_projects();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_dashboard_timeline(frame, &app, area);
        });
        assert!(output.contains("Site redesign"));
        assert!(output.contains("15 January 2023  \u{2192}  30 June 2023"));
    }

    #[test]
    fn project_timeline_keeps_entry_order() {
        let app = app_in_project();
        let vm = app.view_model().unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_project_timeline(frame, &app, &vm, area);
        });
        // Entries appear in projection order, not sorted by date
        let pages = output.find("Build pages").unwrap();
        let mockups = output.find("Design mockups").unwrap();
        assert!(pages < mockups);
        assert!(output.contains("01 March 2023"));
        assert!(output.contains("No description"));
    }

    #[test]
    fn project_timeline_empty() {
        let mut app = app_in_project();
        if let crate::tui::app::Screen::Project(screen) = &mut app.screen {
            screen.tasks.clear();
        }
        let vm = app.view_model().unwrap();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            super::render_project_timeline(frame, &app, &vm, area);
        });
        assert_snapshot!(output, @" No tasks");
    }
}
