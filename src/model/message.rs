use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project message. `sender_id` is an opaque identity from the auth
/// collaborator; it is compared against the viewer only to decide
/// alignment in the composed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: Option<bool>,
}
