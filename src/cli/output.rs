use serde::Serialize;

use crate::model::{Project, Status, Task};
use crate::view::compose::{MessageView, ViewModel};
use crate::view::progress::ProgressSummary;
use crate::view::timeline::TimelineEntry;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: String,
    pub title: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Serialize)]
pub struct ProjectListJson {
    pub projects: Vec<ProjectJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub project: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Serialize)]
pub struct TimelineEntryJson {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub status: Status,
}

#[derive(Serialize)]
pub struct MessageJson {
    pub id: String,
    pub content: String,
    pub sent_at: String,
    pub from_me: bool,
}

#[derive(Serialize)]
pub struct ViewModelJson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub status_label: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: ProgressJson,
    pub timeline: Vec<TimelineEntryJson>,
    pub recent_messages: Vec<MessageJson>,
    pub active_tab: String,
}

#[derive(Serialize)]
pub struct StatusCountsJson {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delayed: usize,
    pub live: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub projects: Vec<ProjectStatsJson>,
    pub totals: StatusCountsJson,
}

#[derive(Serialize)]
pub struct ProjectStatsJson {
    pub id: String,
    pub title: String,
    pub tasks: StatusCountsJson,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub kind: String,
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn project_to_json(project: &Project) -> ProjectJson {
    ProjectJson {
        id: project.id.clone(),
        title: project.title.clone(),
        status: project.status,
        description: project.description.clone(),
        start_date: project.start_date.to_string(),
        end_date: project.end_date.map(|d| d.to_string()),
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        status: task.status,
        description: task.description.clone(),
        due_date: task.due_date.map(|d| d.to_string()),
    }
}

pub fn progress_to_json(progress: &ProgressSummary) -> ProgressJson {
    ProgressJson {
        completed: progress.completed,
        total: progress.total,
        percentage: progress.percentage,
    }
}

pub fn timeline_entry_to_json(entry: &TimelineEntry) -> TimelineEntryJson {
    TimelineEntryJson {
        id: entry.id.clone(),
        title: entry.title.clone(),
        date: entry.date.clone(),
        description: entry.description.clone(),
        status: entry.status,
    }
}

pub fn message_to_json(message: &MessageView) -> MessageJson {
    MessageJson {
        id: message.id.clone(),
        content: message.content.clone(),
        sent_at: message.sent_at.clone(),
        from_me: message.from_me,
    }
}

pub fn view_model_to_json(vm: &ViewModel) -> ViewModelJson {
    ViewModelJson {
        id: vm.project_id.clone(),
        title: vm.title.clone(),
        description: vm.description.clone(),
        status: vm.status,
        status_label: vm.status_display.label.to_string(),
        start_date: vm.start_date.clone(),
        end_date: vm.end_date.clone(),
        progress: progress_to_json(&vm.progress),
        timeline: vm.timeline.iter().map(timeline_entry_to_json).collect(),
        recent_messages: vm.recent_messages().iter().map(message_to_json).collect(),
        active_tab: vm.active_tab.name().to_string(),
    }
}

/// Count tasks by status.
pub fn count_statuses(tasks: &[Task]) -> StatusCountsJson {
    let count = |status: Status| tasks.iter().filter(|t| t.status == status).count();
    StatusCountsJson {
        pending: count(Status::Pending),
        in_progress: count(Status::InProgress),
        completed: count(Status::Completed),
        delayed: count(Status::Delayed),
        live: count(Status::Live),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a project as a one-line summary: `◐ Site redesign [In progress] 56%`
pub fn format_project_line(project: &Project, progress: &ProgressSummary) -> String {
    let display = project.status.display();
    format!(
        "{} {} [{}] {}%",
        display.glyph, project.title, display.label, progress.percentage
    )
}

/// Format a task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let display = task.status.display();
    let due = task
        .due_date
        .map(|d| format!("  due {}", d))
        .unwrap_or_default();
    format!("{} {}{}", display.glyph, task.title, due)
}

/// Format a timeline entry as an indented block
pub fn format_timeline_entry(entry: &TimelineEntry) -> Vec<String> {
    let display = entry.status.display();
    vec![
        format!("{} {} [{}]", display.glyph, entry.title, display.label),
        format!("  {}", entry.date),
        format!("  {}", entry.description),
    ]
}

/// Format a progress summary: `14/25 tasks completed (56%)`
pub fn format_progress_line(progress: &ProgressSummary) -> String {
    format!(
        "{}/{} tasks completed ({}%)",
        progress.completed, progress.total, progress.percentage
    )
}

/// Format a message as a chat line; the viewer's own messages get a `>` marker.
pub fn format_message_line(message: &MessageView) -> String {
    let marker = if message.from_me { ">" } else { " " };
    format!("{} [{}] {}", marker, message.sent_at, message.content)
}

/// Format status counts: `2○ 3◐ 5✓ 1! 0●`
pub fn format_status_counts(counts: &StatusCountsJson) -> String {
    format!(
        "{}{} {}{} {}{} {}{} {}{}",
        counts.pending,
        Status::Pending.display().glyph,
        counts.in_progress,
        Status::InProgress.display().glyph,
        counts.completed,
        Status::Completed.display().glyph,
        counts.delayed,
        Status::Delayed.display().glyph,
        counts.live,
        Status::Live.display().glyph,
    )
}

/// Parse a status filter string
pub fn parse_status_filter(s: &str) -> Result<Status, String> {
    Status::parse(s).map_err(|e| e.to_string())
}

/// Format the full messages list (oldest first)
pub fn format_message_list(messages: &[MessageView]) -> Vec<String> {
    messages.iter().map(format_message_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(status: Status) -> Task {
        Task {
            id: "t".into(),
            project_id: "p".into(),
            title: "task".into(),
            description: None,
            status,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_count_statuses() {
        let tasks = vec![
            task(Status::Pending),
            task(Status::Completed),
            task(Status::Completed),
            task(Status::Delayed),
        ];
        let counts = count_statuses(&tasks);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.in_progress, 0);
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.delayed, 1);
        assert_eq!(counts.live, 0);
    }

    #[test]
    fn test_format_progress_line() {
        let progress = ProgressSummary::new(14, 25);
        assert_eq!(format_progress_line(&progress), "14/25 tasks completed (56%)");
    }

    #[test]
    fn test_format_task_line_with_due() {
        let mut t = task(Status::InProgress);
        t.title = "Build pages".into();
        t.due_date = Some("2023-03-01".parse().unwrap());
        assert_eq!(format_task_line(&t), "\u{25D0} Build pages  due 2023-03-01");
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter("in-progress"), Ok(Status::InProgress));
        assert!(parse_status_filter("bogus").is_err());
    }
}
