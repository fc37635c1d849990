use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::status::Status;

/// A project record as stored in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    pub start_date: NaiveDate,
    /// Absent means "not yet scheduled"
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
