use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::session;
use crate::io::store::{self, Workspace};
use crate::io::watcher::WorkspaceWatcher;
use crate::model::{Message, Project, Task};
use crate::view::compose::{self, ViewModel};
use crate::view::tabs::{DASHBOARD_TABS, PROJECT_TABS, TabController};

use super::input;
use super::render;
use super::theme::Theme;

/// Detail screen state for one opened project
pub struct ProjectScreen {
    pub project: Project,
    pub tasks: Vec<Task>,
    pub messages: Vec<Message>,
    pub tabs: TabController,
    pub scroll: usize,
}

/// Which screen is currently displayed
pub enum Screen {
    /// Top-level dashboard over all projects
    Projects,
    /// One project's tabbed detail view
    Project(ProjectScreen),
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Compose,
}

/// Main application state
pub struct App {
    pub workspace: Workspace,
    pub projects: Vec<Project>,
    /// Tasks per project id, for the dashboard progress and stats tabs
    pub dashboard_tasks: HashMap<String, Vec<Task>>,
    pub viewer: Option<String>,
    pub theme: Theme,
    pub screen: Screen,
    pub mode: Mode,
    pub should_quit: bool,
    /// Tab controller for the dashboard screen
    pub dashboard_tabs: TabController,
    /// Cursor index into the (filtered) dashboard project list
    pub projects_cursor: usize,
    /// One-shot message shown in the status row
    pub notice: Option<String>,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Last executed search pattern (filters the dashboard list)
    pub last_search: Option<String>,
    /// Compose mode: message draft
    pub compose_input: String,
    /// Byte offset of the compose cursor
    pub compose_cursor: usize,
}

impl App {
    pub fn new(workspace: Workspace, projects: Vec<Project>, viewer: Option<String>) -> Self {
        let theme = Theme::from_config(&workspace.config.ui);
        App {
            workspace,
            projects,
            dashboard_tasks: HashMap::new(),
            viewer,
            theme,
            screen: Screen::Projects,
            mode: Mode::Navigate,
            should_quit: false,
            dashboard_tabs: TabController::new(DASHBOARD_TABS),
            projects_cursor: 0,
            notice: None,
            search_input: String::new(),
            last_search: None,
            compose_input: String::new(),
            compose_cursor: 0,
        }
    }

    /// The dashboard list after applying the active search filter.
    pub fn visible_projects(&self) -> Vec<&Project> {
        match self.active_search_re() {
            Some(re) => self
                .projects
                .iter()
                .filter(|p| re.is_match(&p.title))
                .collect(),
            None => self.projects.iter().collect(),
        }
    }

    /// Compile the active search pattern for filtering and highlighting.
    /// In Search mode: from current input. Otherwise: from last_search.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            _ => self.last_search.as_deref()?,
        };
        Regex::new(&format!("(?i){}", pattern))
            .or_else(|_| Regex::new(&format!("(?i){}", regex::escape(pattern))))
            .ok()
    }

    /// Enter the detail screen for a project, with its records already
    /// fetched. The tab controller resets to the default tab whenever the
    /// subject project changes.
    pub fn open_project(&mut self, project: Project, tasks: Vec<Task>, messages: Vec<Message>) {
        let mut tabs = match &self.screen {
            Screen::Project(screen) => screen.tabs.clone(),
            Screen::Projects => TabController::new(PROJECT_TABS),
        };
        tabs.set_subject(&project.id);
        self.screen = Screen::Project(ProjectScreen {
            project,
            tasks,
            messages,
            tabs,
            scroll: 0,
        });
    }

    /// Fetch and open the project under the dashboard cursor.
    pub fn open_selected(&mut self) {
        let id = match self.visible_projects().get(self.projects_cursor) {
            Some(p) => p.id.clone(),
            None => return,
        };
        match self.fetch_screen_data(&id) {
            Ok((project, tasks, messages)) => self.open_project(project, tasks, messages),
            Err(e) => self.notice = Some(format!("load failed: {}", e)),
        }
    }

    fn fetch_screen_data(
        &mut self,
        id: &str,
    ) -> Result<(Project, Vec<Task>, Vec<Message>), store::StoreError> {
        let project = store::fetch_project(&self.workspace, id)?;
        let (tasks, warnings) = store::fetch_tasks(&self.workspace, id)?;
        if let Some(w) = warnings.first() {
            self.notice = Some(format!("warning: {} (record skipped)", w));
        }
        let messages = store::fetch_messages(&self.workspace, id)?;
        Ok((project, tasks, messages))
    }

    /// Leave the detail screen.
    pub fn close_project(&mut self) {
        self.screen = Screen::Projects;
        self.mode = Mode::Navigate;
        self.compose_input.clear();
        self.compose_cursor = 0;
    }

    /// The composed render payload for the current detail screen.
    pub fn view_model(&self) -> Option<ViewModel> {
        match &self.screen {
            Screen::Project(screen) => Some(compose::compose(
                &screen.project,
                &screen.tasks,
                &screen.messages,
                self.viewer.as_deref(),
                screen.tabs.current(),
            )),
            Screen::Projects => None,
        }
    }

    /// Re-read everything from disk. Called when the watcher reports a
    /// change or on explicit refresh.
    ///
    /// An open project is revalidated against the fresh list: responses
    /// for a project that no longer exists must not leak into the view,
    /// so the app falls back to the dashboard instead.
    pub fn reload(&mut self) {
        let workspace = match store::load_workspace(&self.workspace.root) {
            Ok(ws) => ws,
            Err(e) => {
                self.notice = Some(format!("reload failed: {}", e));
                return;
            }
        };
        self.theme = Theme::from_config(&workspace.config.ui);
        self.workspace = workspace;
        self.viewer = session::read_session(&self.workspace.klyra_dir).map(|s| s.user_id);

        match store::fetch_projects(&self.workspace) {
            Ok((projects, warnings)) => {
                if let Some(w) = warnings.first() {
                    self.notice = Some(format!("warning: {} (record skipped)", w));
                }
                self.projects = projects;
            }
            Err(e) => {
                self.notice = Some(format!("reload failed: {}", e));
                return;
            }
        }

        let mut dashboard_tasks = HashMap::new();
        for project in &self.projects {
            if let Ok((tasks, _)) = store::fetch_tasks(&self.workspace, &project.id) {
                dashboard_tasks.insert(project.id.clone(), tasks);
            }
        }
        self.dashboard_tasks = dashboard_tasks;

        let open_id = match &self.screen {
            Screen::Project(screen) => Some(screen.project.id.clone()),
            Screen::Projects => None,
        };
        if let Some(id) = open_id {
            if self.projects.iter().any(|p| p.id == id) {
                match self.fetch_screen_data(&id) {
                    Ok((project, tasks, messages)) => {
                        if let Screen::Project(screen) = &mut self.screen {
                            screen.project = project;
                            screen.tasks = tasks;
                            screen.messages = messages;
                        }
                    }
                    Err(e) => {
                        self.close_project();
                        self.notice = Some(format!("project unavailable: {}", e));
                    }
                }
            } else {
                self.close_project();
                self.notice = Some("project was removed, returning to dashboard".to_string());
            }
        }

        // Keep the cursor on a valid row
        let count = self.visible_projects().len();
        if self.projects_cursor >= count {
            self.projects_cursor = count.saturating_sub(1);
        }
    }

    /// Send the compose draft as a message to the open project.
    pub fn send_compose(&mut self) {
        let content = self.compose_input.trim().to_string();
        if content.is_empty() {
            return;
        }
        let viewer = match self.viewer.clone() {
            Some(v) => v,
            None => {
                self.notice = Some("not signed in (run `kly login <user-id>`)".to_string());
                return;
            }
        };
        let project_id = match &self.screen {
            Screen::Project(screen) => screen.project.id.clone(),
            Screen::Projects => return,
        };
        match store::insert_message(&self.workspace, &project_id, Some(&viewer), &content) {
            Ok(message) => {
                if let Screen::Project(screen) = &mut self.screen {
                    screen.messages.push(message);
                }
                self.compose_input.clear();
                self.compose_cursor = 0;
                self.mode = Mode::Navigate;
            }
            Err(e) => self.notice = Some(format!("send failed: {}", e)),
        }
    }
}

/// Run the TUI application
pub fn run(workspace_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    // Discover and load the workspace
    let start = match workspace_dir {
        Some(dir) => std::fs::canonicalize(dir)?,
        None => std::env::current_dir()?,
    };
    let root = store::discover_workspace(&start)?;
    let workspace = store::load_workspace(&root)?;
    let viewer = session::read_session(&workspace.klyra_dir).map(|s| s.user_id);

    let mut app = App::new(workspace, Vec::new(), viewer);
    app.reload();

    // Watch the klyra/ directory so external writes show up live
    let watcher = WorkspaceWatcher::start(&app.workspace.klyra_dir).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&WorkspaceWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.reload();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
