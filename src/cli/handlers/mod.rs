mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use regex::RegexBuilder;

/// Global override for workspace directory (set by -C flag)
static WORKSPACE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::session::{self, Session};
use crate::io::store::{self, NewProject, NewTask, StoreError, Workspace};
use crate::model::{Project, Status};
use crate::view::compose::{self, MessageView};
use crate::view::progress::ProgressSummary;
use crate::view::tabs::PROJECT_TABS;
use crate::view::timeline;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_workspace_cwd()
    if let Some(ref dir) = cli.workspace_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        WORKSPACE_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        None => {
            // No subcommand launches the TUI; handled in main.rs
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before workspace discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::Projects => cmd_projects(json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Tasks(args) => cmd_tasks(args, json),
            Commands::Timeline(args) => cmd_timeline(args, json),
            Commands::Progress(args) => cmd_progress(args, json),
            Commands::Messages(args) => cmd_messages(args, json),
            Commands::Stats => cmd_stats(json),
            Commands::Search(args) => cmd_search(args, json),

            // Write commands
            Commands::New(args) => cmd_new(args, json),
            Commands::Add(args) => cmd_add(args, json),
            Commands::Send(args) => cmd_send(args, json),

            // Session
            Commands::Login(args) => cmd_login(args),
            Commands::Logout => cmd_logout(),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_workspace_cwd() -> Result<Workspace, StoreError> {
    let start = match WORKSPACE_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(StoreError::IoError)?,
    };
    let root = store::discover_workspace(&start)?;
    store::load_workspace(&root)
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {} (record skipped)", w);
    }
}

/// Resolve a project argument: exact id first, then unique
/// case-insensitive title prefix.
fn resolve_project(
    ws: &Workspace,
    needle: &str,
) -> Result<Project, Box<dyn std::error::Error>> {
    let (projects, warnings) = store::fetch_projects(ws)?;
    print_warnings(&warnings);

    if let Some(p) = projects.iter().find(|p| p.id == needle) {
        return Ok(p.clone());
    }

    let lowered = needle.to_lowercase();
    let matches: Vec<&Project> = projects
        .iter()
        .filter(|p| p.title.to_lowercase().starts_with(&lowered))
        .collect();

    match matches.len() {
        0 => Err(format!("no project matches '{}'", needle).into()),
        1 => Ok(matches[0].clone()),
        n => {
            let titles: Vec<&str> = matches.iter().map(|p| p.title.as_str()).collect();
            Err(format!(
                "'{}' is ambiguous ({} matches: {})",
                needle,
                n,
                titles.join(", ")
            )
            .into())
        }
    }
}

fn parse_date(s: &str, what: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    s.parse()
        .map_err(|_| format!("invalid {} '{}' (expected YYYY-MM-DD)", what, s).into())
}

fn viewer_id(ws: &Workspace) -> Option<String> {
    session::read_session(&ws.klyra_dir).map(|s| s.user_id)
}

fn message_views(ws: &Workspace, project_id: &str) -> Result<Vec<MessageView>, StoreError> {
    let viewer = viewer_id(ws);
    let messages = store::fetch_messages(ws, project_id)?;
    Ok(messages
        .iter()
        .map(|m| MessageView {
            id: m.id.clone(),
            content: m.content.clone(),
            sent_at: compose::format_message_time(m.created_at),
            from_me: viewer.is_some() && m.sender_id == viewer,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_projects(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let (projects, warnings) = store::fetch_projects(&ws)?;
    print_warnings(&warnings);

    if json {
        let list = ProjectListJson {
            projects: projects.iter().map(project_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if projects.is_empty() {
        println!("No projects yet. Create one with: kly new \"Title\"");
    } else {
        for project in &projects {
            let (tasks, task_warnings) = store::fetch_tasks(&ws, &project.id)?;
            print_warnings(&task_warnings);
            let progress = ProgressSummary::from_tasks(&tasks);
            println!("{}", format_project_line(project, &progress));
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let (tasks, warnings) = store::fetch_tasks(&ws, &project.id)?;
    print_warnings(&warnings);
    let messages = store::fetch_messages(&ws, &project.id)?;
    let viewer = viewer_id(&ws);

    let vm = compose::compose(
        &project,
        &tasks,
        &messages,
        viewer.as_deref(),
        PROJECT_TABS[0],
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&view_model_to_json(&vm))?);
        return Ok(());
    }

    let display = &vm.status_display;
    println!("{} {} [{}]", display.glyph, vm.title, display.label);
    println!("  {} → {}", vm.start_date, vm.end_date);
    println!("  {}", vm.description);
    println!();
    println!("Progress: {}", format_progress_line(&vm.progress));
    if !vm.timeline.is_empty() {
        println!();
        println!("Timeline:");
        for entry in &vm.timeline {
            for line in format_timeline_entry(entry) {
                println!("  {}", line);
            }
        }
    }
    let recent = vm.recent_messages();
    if !recent.is_empty() {
        println!();
        println!("Recent messages:");
        for message in recent {
            println!("  {}", format_message_line(message));
        }
    }
    Ok(())
}

fn cmd_tasks(args: TasksArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let (mut tasks, warnings) = store::fetch_tasks(&ws, &project.id)?;
    print_warnings(&warnings);

    if let Some(ref filter) = args.status {
        let status = parse_status_filter(filter)?;
        tasks.retain(|t| t.status == status);
    }

    if json {
        let list = TaskListJson {
            project: project.id.clone(),
            tasks: tasks.iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if tasks.is_empty() {
        println!("No tasks.");
    } else {
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_timeline(args: TimelineArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let (tasks, warnings) = store::fetch_tasks(&ws, &project.id)?;
    print_warnings(&warnings);
    let entries = timeline::project_timeline(&tasks);

    if json {
        let list: Vec<TimelineEntryJson> = entries.iter().map(timeline_entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if entries.is_empty() {
        println!("No tasks.");
    } else {
        for entry in &entries {
            for line in format_timeline_entry(entry) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_progress(args: ProgressArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let (tasks, warnings) = store::fetch_tasks(&ws, &project.id)?;
    print_warnings(&warnings);
    let progress = ProgressSummary::from_tasks(&tasks);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&progress_to_json(&progress))?
        );
    } else {
        println!("{}", format_progress_line(&progress));
    }
    Ok(())
}

fn cmd_messages(args: MessagesArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let views = message_views(&ws, &project.id)?;

    if json {
        let list: Vec<MessageJson> = views.iter().map(message_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else if views.is_empty() {
        println!("No messages.");
    } else {
        for line in format_message_list(&views) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let (projects, warnings) = store::fetch_projects(&ws)?;
    print_warnings(&warnings);

    let mut per_project = Vec::new();
    let mut all_tasks = Vec::new();
    for project in &projects {
        let (tasks, task_warnings) = store::fetch_tasks(&ws, &project.id)?;
        print_warnings(&task_warnings);
        per_project.push(ProjectStatsJson {
            id: project.id.clone(),
            title: project.title.clone(),
            tasks: count_statuses(&tasks),
        });
        all_tasks.extend(tasks);
    }
    let totals = count_statuses(&all_tasks);

    if json {
        let stats = StatsJson {
            projects: per_project,
            totals,
        };
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for stats in &per_project {
            println!("{}  {}", format_status_counts(&stats.tasks), stats.title);
        }
        println!("{}  total", format_status_counts(&totals));
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let re = RegexBuilder::new(&args.pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| format!("invalid pattern: {}", e))?;

    let (projects, warnings) = store::fetch_projects(&ws)?;
    print_warnings(&warnings);

    let mut hits = Vec::new();
    for project in &projects {
        if re.is_match(&project.title) {
            hits.push(SearchHitJson {
                kind: "project".to_string(),
                id: project.id.clone(),
                title: project.title.clone(),
                project: None,
            });
        }
        let (tasks, task_warnings) = store::fetch_tasks(&ws, &project.id)?;
        print_warnings(&task_warnings);
        for task in &tasks {
            if re.is_match(&task.title) {
                hits.push(SearchHitJson {
                    kind: "task".to_string(),
                    id: task.id.clone(),
                    title: task.title.clone(),
                    project: Some(project.title.clone()),
                });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("No matches.");
    } else {
        for hit in &hits {
            match &hit.project {
                Some(project) => println!("task     {}  ({})", hit.title, project),
                None => println!("project  {}", hit.title),
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let start_date = match args.start.as_deref() {
        Some(s) => parse_date(s, "start date")?,
        None => Local::now().date_naive(),
    };
    let end_date = args
        .end
        .as_deref()
        .map(|s| parse_date(s, "end date"))
        .transpose()?;

    let project = store::insert_project(
        &ws,
        NewProject {
            title: args.title,
            description: args.description,
            status: Status::Pending,
            start_date,
            end_date,
        },
    )?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&project_to_json(&project))?
        );
    } else {
        println!("Created project {} ({})", project.title, project.id);
    }
    Ok(())
}

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let project = resolve_project(&ws, &args.project)?;
    let due_date = args
        .due
        .as_deref()
        .map(|s| parse_date(s, "due date"))
        .transpose()?;

    let task = store::insert_task(
        &ws,
        &project.id,
        NewTask {
            title: args.title,
            description: args.description,
            status: Status::Pending,
            due_date,
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("Added task {} to {}", task.title, project.title);
    }
    Ok(())
}

fn cmd_send(args: SendArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let viewer =
        viewer_id(&ws).ok_or("not signed in (run `kly login <user-id>` first)")?;
    if args.content.trim().is_empty() {
        return Err("message content cannot be empty".into());
    }
    let project = resolve_project(&ws, &args.project)?;
    let message = store::insert_message(&ws, &project.id, Some(&viewer), &args.content)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("Sent to {}", project.title);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

fn cmd_login(args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    session::write_session(
        &ws.klyra_dir,
        &Session {
            user_id: args.user_id.clone(),
        },
    )?;
    println!("Signed in as {}", args.user_id);
    Ok(())
}

fn cmd_logout() -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    session::clear_session(&ws.klyra_dir)?;
    println!("Signed out");
    Ok(())
}
