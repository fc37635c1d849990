use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kly", about = concat!("[*] klyra v", env!("CARGO_PKG_VERSION"), " - your projects, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "workspace-dir", global = true)]
    pub workspace_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new klyra workspace in the current directory
    Init(InitArgs),
    /// List projects
    Projects,
    /// Show a project's composed view (overview, progress, timeline, messages)
    Show(ShowArgs),
    /// List a project's tasks
    Tasks(TasksArgs),
    /// Show a project's timeline
    Timeline(TimelineArgs),
    /// Show a project's progress summary
    Progress(ProgressArgs),
    /// Show a project's messages
    Messages(MessagesArgs),
    /// Show task counts by status across all projects
    Stats,
    /// Search project and task titles by regex
    Search(SearchArgs),
    /// Create a project
    New(NewArgs),
    /// Add a task to a project
    Add(AddArgs),
    /// Send a message to a project (requires `kly login`)
    Send(SendArgs),
    /// Sign in as a user id
    Login(LoginArgs),
    /// Sign out
    Logout,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Workspace name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if klyra/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Project id (or unique title prefix)
    pub project: String,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Project id (or unique title prefix)
    pub project: String,
    /// Filter by status (pending, in-progress, completed, delayed, live)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TimelineArgs {
    /// Project id (or unique title prefix)
    pub project: String,
}

#[derive(Args)]
pub struct ProgressArgs {
    /// Project id (or unique title prefix)
    pub project: String,
}

#[derive(Args)]
pub struct MessagesArgs {
    /// Project id (or unique title prefix)
    pub project: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern (case-insensitive)
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NewArgs {
    /// Project title
    pub title: String,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub start: Option<String>,
    /// Estimated end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Project id (or unique title prefix)
    pub project: String,
    /// Task title
    pub title: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Project id (or unique title prefix)
    pub project: String,
    /// Message content
    pub content: String,
}

#[derive(Args)]
pub struct LoginArgs {
    /// User id (opaque token from your auth provider)
    pub user_id: String,
}
