use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// One or more record files changed on disk.
    Changed(Vec<PathBuf>),
}

/// A file system watcher for the klyra/ directory, so the dashboard
/// reflects writes made by other processes.
pub struct WorkspaceWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl WorkspaceWatcher {
    /// Start watching the given `klyra/` directory.
    /// Returns a `WorkspaceWatcher` whose `poll()` method should be called each tick.
    pub fn start(klyra_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let klyra_dir_owned = klyra_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant: Vec<PathBuf> = event
                    .paths
                    .into_iter()
                    .filter(|p| {
                        if !p.starts_with(&klyra_dir_owned) {
                            return false;
                        }
                        // Skip the lock and session files
                        if let Some(name) = p.file_name().and_then(|n| n.to_str())
                            && (name == ".lock" || name == ".session.toml")
                        {
                            return false;
                        }
                        // Only record and config files matter
                        matches!(
                            p.extension().and_then(|e| e.to_str()),
                            Some("json") | Some("toml")
                        )
                    })
                    .collect();

                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(klyra_dir, RecursiveMode::Recursive)?;
        Ok(WorkspaceWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
