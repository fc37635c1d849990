use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::Workspace;
use crate::model::{
    Message, Project, Status, Task, WorkspaceConfig, WorkspaceInfo,
};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A workspace that never touches disk.
pub fn test_workspace() -> Workspace {
    Workspace {
        root: PathBuf::from("/tmp/test-klyra"),
        klyra_dir: PathBuf::from("/tmp/test-klyra/klyra"),
        config: WorkspaceConfig {
            workspace: WorkspaceInfo {
                name: "Acme".into(),
            },
            ui: Default::default(),
        },
    }
}

pub fn project(id: &str, title: &str, status: Status, day: u32) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        description: Some("Redesign of the marketing site".into()),
        status,
        start_date: "2023-01-15".parse().unwrap(),
        end_date: Some("2023-06-30".parse().unwrap()),
        created_at: Utc.with_ymd_and_hms(2023, 1, day, 9, 0, 0).unwrap(),
    }
}

pub fn task(id: &str, title: &str, status: Status, day: u32) -> Task {
    Task {
        id: id.into(),
        project_id: "p1".into(),
        title: title.into(),
        description: None,
        status,
        due_date: Some("2023-03-01".parse().unwrap()),
        created_at: Utc.with_ymd_and_hms(2023, 2, day, 9, 0, 0).unwrap(),
    }
}

pub fn message(id: &str, sender: Option<&str>, content: &str, hour: u32) -> Message {
    Message {
        id: id.into(),
        project_id: "p1".into(),
        sender_id: sender.map(String::from),
        content: content.into(),
        created_at: Utc.with_ymd_and_hms(2023, 3, 1, hour, 5, 0).unwrap(),
        is_read: None,
    }
}

/// An app with no projects at all.
pub fn empty_app() -> App {
    App::new(test_workspace(), Vec::new(), None)
}

/// An app on the dashboard with two projects and cached tasks.
pub fn app_with_projects() -> App {
    let projects = vec![
        project("p1", "Site redesign", Status::InProgress, 20),
        project("p2", "Mobile app", Status::Pending, 10),
    ];
    let mut app = App::new(test_workspace(), projects, Some("u-1".into()));
    app.dashboard_tasks.insert(
        "p1".into(),
        vec![
            task("t1", "Design mockups", Status::Completed, 3),
            task("t2", "Build pages", Status::InProgress, 2),
        ],
    );
    app.dashboard_tasks.insert("p2".into(), Vec::new());
    app
}

/// An app inside the "Site redesign" project screen.
pub fn app_in_project() -> App {
    let mut app = app_with_projects();
    let p = project("p1", "Site redesign", Status::InProgress, 20);
    let tasks = vec![
        task("t2", "Build pages", Status::InProgress, 3),
        task("t1", "Design mockups", Status::Completed, 2),
    ];
    let messages = vec![
        message("m1", Some("u-2"), "Mockups are ready for review", 9),
        message("m2", Some("u-1"), "Looking now, thanks", 10),
    ];
    app.open_project(p, tasks, messages);
    app
}
