/// A named view selection within a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Overview,
    Progress,
    Timeline,
    Statistics,
    Messages,
}

/// Tabs available on the project detail screen, in display order.
pub const PROJECT_TABS: &[Tab] = &[
    Tab::Overview,
    Tab::Progress,
    Tab::Timeline,
    Tab::Statistics,
    Tab::Messages,
];

/// Tabs available on the top-level dashboard, in display order.
pub const DASHBOARD_TABS: &[Tab] = &[
    Tab::Dashboard,
    Tab::Progress,
    Tab::Timeline,
    Tab::Statistics,
];

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Overview => "Overview",
            Tab::Progress => "Progress",
            Tab::Timeline => "Timeline",
            Tab::Statistics => "Statistics",
            Tab::Messages => "Messages",
        }
    }

    /// Stable lowercase name used in JSON output and tests.
    pub fn name(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Overview => "overview",
            Tab::Progress => "progress",
            Tab::Timeline => "timeline",
            Tab::Statistics => "statistics",
            Tab::Messages => "messages",
        }
    }
}

/// A tab selection outside the screen's fixed set was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tab '{0}' is not available on this screen")]
pub struct InvalidTabError(pub &'static str);

/// Holds the single selected tab for one screen instance.
///
/// The controller lives as long as its screen. When the screen's subject
/// (project id) changes, [`TabController::set_subject`] drops back to the
/// default tab so a stale selection never carries over.
#[derive(Debug, Clone)]
pub struct TabController {
    tabs: &'static [Tab],
    current: Tab,
    subject: Option<String>,
}

impl TabController {
    /// The first tab in the set is the default.
    pub fn new(tabs: &'static [Tab]) -> Self {
        debug_assert!(!tabs.is_empty());
        TabController {
            tabs,
            current: tabs[0],
            subject: None,
        }
    }

    pub fn tabs(&self) -> &'static [Tab] {
        self.tabs
    }

    pub fn current(&self) -> Tab {
        self.current
    }

    /// Select a tab. A tab outside this screen's set is rejected and the
    /// current selection is retained.
    pub fn select(&mut self, tab: Tab) -> Result<(), InvalidTabError> {
        if !self.tabs.contains(&tab) {
            return Err(InvalidTabError(tab.name()));
        }
        self.current = tab;
        Ok(())
    }

    /// Select the tab at a display position, if any (number-key shortcut).
    pub fn select_index(&mut self, index: usize) -> bool {
        if let Some(&tab) = self.tabs.get(index) {
            self.current = tab;
            true
        } else {
            false
        }
    }

    /// Cycle to the next tab, wrapping around.
    pub fn next(&mut self) {
        let idx = self.current_index();
        self.current = self.tabs[(idx + 1) % self.tabs.len()];
    }

    /// Cycle to the previous tab, wrapping around.
    pub fn prev(&mut self) {
        let idx = self.current_index();
        self.current = self.tabs[(idx + self.tabs.len() - 1) % self.tabs.len()];
    }

    /// Bind the controller to a subject (e.g. a project id). A changed
    /// subject resets the selection to the default tab.
    pub fn set_subject(&mut self, subject: &str) {
        if self.subject.as_deref() != Some(subject) {
            self.subject = Some(subject.to_string());
            self.current = self.tabs[0];
        }
    }

    fn current_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|&t| t == self.current)
            .unwrap_or(0)
    }
}
