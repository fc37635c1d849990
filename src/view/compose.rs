use chrono::{DateTime, Utc};

use crate::model::{Message, Project, StatusDisplay, Task};

use super::progress::ProgressSummary;
use super::tabs::Tab;
use super::timeline::{self, TimelineEntry, NO_DESCRIPTION, UNSCHEDULED};

/// How many messages the overview preview shows.
pub const MESSAGE_PREVIEW_COUNT: usize = 3;

/// A message prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: String,
    pub content: String,
    pub sent_at: String,
    /// True when the viewer sent this message (right-aligned bubble).
    pub from_me: bool,
}

/// The complete render payload for a project screen. A pure aggregation
/// of already-fetched records; holds no identity and is recomputed on
/// every render.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub status: crate::model::Status,
    pub status_display: StatusDisplay,
    pub start_date: String,
    pub end_date: String,
    pub progress: ProgressSummary,
    pub timeline: Vec<TimelineEntry>,
    /// All messages, chronological ascending as stored.
    pub messages: Vec<MessageView>,
    pub active_tab: Tab,
}

impl ViewModel {
    /// The trailing slice shown in the overview preview.
    pub fn recent_messages(&self) -> &[MessageView] {
        let skip = self.messages.len().saturating_sub(MESSAGE_PREVIEW_COUNT);
        &self.messages[skip..]
    }
}

/// Format a message timestamp, e.g. "01/03/2023 14:05".
pub fn format_message_time(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Compose the view model for one project screen.
///
/// `viewer` is the signed-in user id, used only to mark messages the
/// viewer sent. Inputs are borrowed and never mutated; messages are
/// expected oldest-first and tasks newest-first, as the store guarantees.
pub fn compose(
    project: &Project,
    tasks: &[Task],
    messages: &[Message],
    viewer: Option<&str>,
    active_tab: Tab,
) -> ViewModel {
    let message_views = messages
        .iter()
        .map(|m| MessageView {
            id: m.id.clone(),
            content: m.content.clone(),
            sent_at: format_message_time(m.created_at),
            from_me: viewer.is_some() && m.sender_id.as_deref() == viewer,
        })
        .collect();

    ViewModel {
        project_id: project.id.clone(),
        title: project.title.clone(),
        description: project
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        status: project.status,
        status_display: project.status.display(),
        start_date: timeline::format_date(project.start_date),
        end_date: project
            .end_date
            .map(timeline::format_date)
            .unwrap_or_else(|| UNSCHEDULED.to_string()),
        progress: ProgressSummary::from_tasks(tasks),
        timeline: timeline::project_timeline(tasks),
        messages: message_views,
        active_tab,
    }
}
