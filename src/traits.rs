//! Seams for dependency injection
//!
//! Orchestration code depends on these traits rather than on the real
//! process runner, tool lookup or history file, so tests can swap in
//! scripted runners, fixed tool tables and in-memory logs.

use crate::error::Result;
use crate::exec::{CommandRunner, SystemRunner, ToolProbe, WhichProbe};
use crate::history::{HistoryEntry, HistoryStore};
use std::sync::{Arc, Mutex};

/// Sink for finished install and uninstall attempts
pub trait HistoryLog: Send + Sync {
    /// Persist one entry; `false` when it could not be saved.
    fn record(&self, entry: HistoryEntry) -> bool;
}

/// In-memory log, for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl HistoryLog for MemoryHistory {
    fn record(&self, entry: HistoryEntry) -> bool {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.push(entry);
                true
            }
            Err(_) => false,
        }
    }
}

/// Everything a command needs to talk to the outside world
#[derive(Clone)]
pub struct AppContext {
    pub runner: Arc<dyn CommandRunner>,
    pub probe: Arc<dyn ToolProbe>,
    pub history: Arc<HistoryStore>,
}

impl AppContext {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        probe: Arc<dyn ToolProbe>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            runner,
            probe,
            history,
        }
    }

    /// Real processes, `PATH` lookup and the default history file.
    pub fn system() -> Result<Self> {
        Ok(Self::new(
            Arc::new(SystemRunner::from_env()),
            Arc::new(WhichProbe),
            Arc::new(HistoryStore::open_default()?),
        ))
    }
}
