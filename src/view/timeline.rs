use chrono::NaiveDate;

use crate::model::{Status, Task};

/// Rendered date for tasks without a due date.
pub const UNSCHEDULED: &str = "Not scheduled";
/// Rendered description for tasks without one.
pub const NO_DESCRIPTION: &str = "No description";

/// One timeline row, derived from a task. Regenerated on every read;
/// both text fields always carry a renderable value, never an absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: String,
    pub title: String,
    pub date: String,
    pub description: String,
    pub status: Status,
}

/// Format a calendar date for display, e.g. "01 March 2023".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Project tasks into timeline entries, one per task.
///
/// Entries come out in the input order. The store yields tasks
/// newest-created-first and the timeline shows that recency order rather
/// than sorting by due date. Product has not confirmed whether a
/// due-date sort is wanted instead; do not change this quietly.
pub fn project_timeline(tasks: &[Task]) -> Vec<TimelineEntry> {
    tasks
        .iter()
        .map(|task| TimelineEntry {
            id: task.id.clone(),
            title: task.title.clone(),
            date: task
                .due_date
                .map(format_date)
                .unwrap_or_else(|| UNSCHEDULED.to_string()),
            description: task
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            status: task.status,
        })
        .collect()
}
