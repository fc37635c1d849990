use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::io::lock::{FileLock, LockError};
use crate::io::write::atomic_write;
use crate::model::config::WorkspaceConfig;
use crate::model::{Message, Project, Status, Task};

/// Error type for workspace store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a klyra workspace: no klyra/ directory found")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse klyra.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not parse {path}: {source}")]
    RecordParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error(transparent)]
    LockError(#[from] LockError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A discovered workspace: the `klyra/` directory plus its config.
#[derive(Debug)]
pub struct Workspace {
    /// Parent of `klyra/`
    pub root: PathBuf,
    /// Path to the `klyra/` directory
    pub klyra_dir: PathBuf,
    /// Parsed klyra.toml
    pub config: WorkspaceConfig,
}

// ---------------------------------------------------------------------------
// On-disk record shapes
// ---------------------------------------------------------------------------

// Status travels as a plain string on disk; it is validated exactly once,
// here, when raw records become model records. Rendering never sees a
// status outside the closed set.

#[derive(Debug, Serialize, Deserialize)]
struct RawProject {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    status: String,
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawTask {
    id: String,
    project_id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    status: String,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl RawProject {
    fn validate(self) -> Result<Project, String> {
        let status = Status::parse(&self.status)
            .map_err(|e| format!("project {}: {}", self.id, e))?;
        Ok(Project {
            id: self.id,
            title: self.title,
            description: self.description,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
        })
    }
}

impl From<&Project> for RawProject {
    fn from(p: &Project) -> Self {
        RawProject {
            id: p.id.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            status: p.status.as_str().to_string(),
            start_date: p.start_date,
            end_date: p.end_date,
            created_at: p.created_at,
        }
    }
}

impl RawTask {
    fn validate(self) -> Result<Task, String> {
        let status =
            Status::parse(&self.status).map_err(|e| format!("task {}: {}", self.id, e))?;
        Ok(Task {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            status,
            due_date: self.due_date,
            created_at: self.created_at,
        })
    }
}

impl From<&Task> for RawTask {
    fn from(t: &Task) -> Self {
        RawTask {
            id: t.id.clone(),
            project_id: t.project_id.clone(),
            title: t.title.clone(),
            description: t.description.clone(),
            status: t.status.as_str().to_string(),
            due_date: t.due_date,
            created_at: t.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery & loading
// ---------------------------------------------------------------------------

/// Discover the workspace by walking up from the given directory,
/// looking for a `klyra/` subdirectory with a klyra.toml.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, StoreError> {
    let mut current = start.to_path_buf();
    loop {
        let klyra_dir = current.join("klyra");
        if klyra_dir.is_dir() && klyra_dir.join("klyra.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(StoreError::NotAWorkspace);
        }
    }
}

/// Load the workspace config from the given root directory.
pub fn load_workspace(root: &Path) -> Result<Workspace, StoreError> {
    let klyra_dir = root.join("klyra");
    if !klyra_dir.is_dir() {
        return Err(StoreError::NotAWorkspace);
    }

    let config_path = klyra_dir.join("klyra.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| StoreError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: WorkspaceConfig = toml::from_str(&config_text)?;

    Ok(Workspace {
        root: root.to_path_buf(),
        klyra_dir,
        config,
    })
}

impl Workspace {
    fn projects_path(&self) -> PathBuf {
        self.klyra_dir.join("projects.json")
    }

    fn tasks_path(&self, project_id: &str) -> PathBuf {
        self.klyra_dir.join("tasks").join(format!("{}.json", project_id))
    }

    fn messages_path(&self, project_id: &str) -> PathBuf {
        self.klyra_dir
            .join("messages")
            .join(format!("{}.json", project_id))
    }
}

/// Read a JSON array file, treating an absent file as an empty list.
fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StoreError::RecordParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(records).map_err(|e| StoreError::RecordParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    atomic_write(path, content.as_bytes())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Fetch all projects, newest-created-first. Records with a status
/// outside the closed set are skipped and reported in the warning list.
pub fn fetch_projects(ws: &Workspace) -> Result<(Vec<Project>, Vec<String>), StoreError> {
    let raw: Vec<RawProject> = read_records(&ws.projects_path())?;
    let mut projects = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    for record in raw {
        match record.validate() {
            Ok(p) => projects.push(p),
            Err(w) => warnings.push(w),
        }
    }
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok((projects, warnings))
}

/// Fetch a single project by id.
pub fn fetch_project(ws: &Workspace, id: &str) -> Result<Project, StoreError> {
    let (projects, _) = fetch_projects(ws)?;
    projects
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))
}

/// Fetch a project's tasks, newest-created-first (the ordering the
/// timeline projection relies on).
pub fn fetch_tasks(
    ws: &Workspace,
    project_id: &str,
) -> Result<(Vec<Task>, Vec<String>), StoreError> {
    let raw: Vec<RawTask> = read_records(&ws.tasks_path(project_id))?;
    let mut tasks = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    for record in raw {
        match record.validate() {
            Ok(t) => tasks.push(t),
            Err(w) => warnings.push(w),
        }
    }
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok((tasks, warnings))
}

/// Fetch a project's messages, oldest-first (chronological, as the
/// message views render them).
pub fn fetch_messages(ws: &Workspace, project_id: &str) -> Result<Vec<Message>, StoreError> {
    let mut messages: Vec<Message> = read_records(&ws.messages_path(project_id))?;
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(messages)
}

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

/// Fields for a new project. Status defaults to pending.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Fields for a new task. Status defaults to pending.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
}

/// Insert a project and return the stored record.
pub fn insert_project(ws: &Workspace, new: NewProject) -> Result<Project, StoreError> {
    let project = Project {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        description: new.description,
        status: new.status,
        start_date: new.start_date,
        end_date: new.end_date,
        created_at: Utc::now(),
    };

    let _lock = FileLock::acquire_default(&ws.klyra_dir)?;
    let mut raw: Vec<RawProject> = read_records(&ws.projects_path())?;
    raw.push(RawProject::from(&project));
    write_records(&ws.projects_path(), &raw)?;
    Ok(project)
}

/// Insert a task under an existing project and return the stored record.
pub fn insert_task(ws: &Workspace, project_id: &str, new: NewTask) -> Result<Task, StoreError> {
    // Reject tasks for projects that do not exist
    fetch_project(ws, project_id)?;

    let task = Task {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_string(),
        title: new.title,
        description: new.description,
        status: new.status,
        due_date: new.due_date,
        created_at: Utc::now(),
    };

    let _lock = FileLock::acquire_default(&ws.klyra_dir)?;
    let path = ws.tasks_path(project_id);
    let mut raw: Vec<RawTask> = read_records(&path)?;
    raw.push(RawTask::from(&task));
    write_records(&path, &raw)?;
    Ok(task)
}

/// Insert a message and return the stored record.
pub fn insert_message(
    ws: &Workspace,
    project_id: &str,
    sender_id: Option<&str>,
    content: &str,
) -> Result<Message, StoreError> {
    fetch_project(ws, project_id)?;

    let message = Message {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_string(),
        sender_id: sender_id.map(String::from),
        content: content.trim().to_string(),
        created_at: Utc::now(),
        is_read: None,
    };

    let _lock = FileLock::acquire_default(&ws.klyra_dir)?;
    let path = ws.messages_path(project_id);
    let mut messages: Vec<Message> = read_records(&path)?;
    messages.push(message.clone());
    write_records(&path, &messages)?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_workspace(root: &Path) {
        let klyra_dir = root.join("klyra");
        fs::create_dir_all(&klyra_dir).unwrap();
        fs::write(
            klyra_dir.join("klyra.toml"),
            "[workspace]\nname = \"test\"\n",
        )
        .unwrap();
        fs::write(
            klyra_dir.join("projects.json"),
            r#"[
  {
    "id": "p1",
    "title": "Site redesign",
    "status": "in-progress",
    "start_date": "2023-01-15",
    "created_at": "2023-01-15T09:00:00Z"
  },
  {
    "id": "p2",
    "title": "Mobile app",
    "status": "pending",
    "start_date": "2023-02-01",
    "created_at": "2023-02-01T09:00:00Z"
  }
]"#,
        )
        .unwrap();
        fs::create_dir_all(klyra_dir.join("tasks")).unwrap();
        fs::write(
            klyra_dir.join("tasks/p1.json"),
            r#"[
  {
    "id": "t1",
    "project_id": "p1",
    "title": "Wireframes",
    "status": "completed",
    "due_date": "2023-03-01",
    "created_at": "2023-01-16T09:00:00Z"
  },
  {
    "id": "t2",
    "project_id": "p1",
    "title": "Build pages",
    "status": "in-progress",
    "created_at": "2023-01-20T09:00:00Z"
  }
]"#,
        )
        .unwrap();
    }

    #[test]
    fn test_discover_workspace() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());

        let root = discover_workspace(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());

        // From a subdirectory
        let sub = tmp.path().join("klyra/tasks");
        let root = discover_workspace(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_discover_workspace_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_workspace(tmp.path()).is_err());
    }

    #[test]
    fn test_fetch_projects_newest_first() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        let (projects, warnings) = fetch_projects(&ws).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, "p2");
        assert_eq!(projects[1].id, "p1");
    }

    #[test]
    fn test_fetch_tasks_newest_first() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        let (tasks, _) = fetch_tasks(&ws, "p1").unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "t2");
        assert_eq!(tasks[1].id, "t1");

        // Project without a task file: empty, not an error
        let (tasks, _) = fetch_tasks(&ws, "p2").unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_unknown_status_skipped_with_warning() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        fs::write(
            tmp.path().join("klyra/tasks/p2.json"),
            r#"[
  {
    "id": "bad",
    "project_id": "p2",
    "title": "Corrupt",
    "status": "archived",
    "created_at": "2023-02-02T09:00:00Z"
  },
  {
    "id": "ok",
    "project_id": "p2",
    "title": "Fine",
    "status": "pending",
    "created_at": "2023-02-03T09:00:00Z"
  }
]"#,
        )
        .unwrap();
        let ws = load_workspace(tmp.path()).unwrap();

        let (tasks, warnings) = fetch_tasks(&ws, "p2").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "ok");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("archived"));
    }

    #[test]
    fn test_insert_task_and_ordering() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        let task = insert_task(
            &ws,
            "p1",
            NewTask {
                title: "Ship it".into(),
                description: None,
                status: Status::Pending,
                due_date: None,
            },
        )
        .unwrap();
        assert_eq!(task.project_id, "p1");

        let (tasks, _) = fetch_tasks(&ws, "p1").unwrap();
        assert_eq!(tasks.len(), 3);
        // Newest insert comes first
        assert_eq!(tasks[0].id, task.id);
    }

    #[test]
    fn test_insert_task_unknown_project() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        let result = insert_task(
            &ws,
            "nope",
            NewTask {
                title: "Orphan".into(),
                description: None,
                status: Status::Pending,
                due_date: None,
            },
        );
        assert!(matches!(result, Err(StoreError::ProjectNotFound(_))));
    }

    #[test]
    fn test_insert_and_fetch_messages_oldest_first() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        insert_message(&ws, "p1", Some("me"), "first").unwrap();
        insert_message(&ws, "p1", Some("them"), "  second  ").unwrap();

        let messages = fetch_messages(&ws, "p1").unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
        assert!(messages[0].created_at <= messages[1].created_at);
    }

    #[test]
    fn test_insert_project() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let ws = load_workspace(tmp.path()).unwrap();

        let project = insert_project(
            &ws,
            NewProject {
                title: "New thing".into(),
                description: Some("desc".into()),
                status: Status::Pending,
                start_date: "2023-05-01".parse().unwrap(),
                end_date: None,
            },
        )
        .unwrap();

        let fetched = fetch_project(&ws, &project.id).unwrap();
        assert_eq!(fetched, project);
    }
}
