use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Screen};

/// Render the tab bar for the current screen, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let bg_style = Style::default().bg(app.theme.background);
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    // Leading chrome: glyph + screen title
    let (controller, heading) = match &app.screen {
        Screen::Projects => (&app.dashboard_tabs, app.workspace.config.workspace.name.clone()),
        Screen::Project(screen) => (&screen.tabs, screen.project.title.clone()),
    };
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25C6}",
        Style::default()
            .fg(app.theme.highlight)
            .bg(app.theme.background),
    ));
    spans.push(Span::styled(
        format!(" {} ", heading),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
    spans.push(sep.clone());

    for &tab in controller.tabs() {
        let is_current = tab == controller.current();
        spans.push(Span::styled(
            format!(" {} ", tab.label()),
            tab_style(app, is_current),
        ));
        sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line: String = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}
