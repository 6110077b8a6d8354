//! Install queue
//!
//! Ordered FIFO of package files with set semantics on the resolved path and
//! a cursor that tracks the entry being processed during a batch run.

use crate::core::types::PackageRef;
use crate::error::Result;
use std::path::Path;

/// Where an entry stands relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Already attempted (succeeded or failed)
    Done,
    Current,
    Pending,
}

#[derive(Debug, Clone, Default)]
pub struct InstallQueue {
    entries: Vec<PackageRef>,
    // None while no batch is running
    cursor: Option<usize>,
}

impl InstallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package unless one with the same resolved path is queued.
    ///
    /// Returns `false` when the package was already present.
    pub fn enqueue(&mut self, package: PackageRef) -> bool {
        if self.contains(package.path()) {
            return false;
        }
        self.entries.push(package);
        true
    }

    /// Build a [`PackageRef`] from a path and enqueue it.
    pub fn enqueue_path(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let package = PackageRef::new(path)?;
        Ok(self.enqueue(package))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|p| p.path() == path)
    }

    /// Remove a pending entry. Entries cannot be removed while a run is active.
    pub fn remove(&mut self, index: usize) -> Option<PackageRef> {
        if self.is_running() || index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PackageRef> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageRef> {
        self.entries.iter()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn current(&self) -> Option<&PackageRef> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    pub fn status_of(&self, index: usize) -> EntryStatus {
        match self.cursor {
            Some(cursor) if index < cursor => EntryStatus::Done,
            Some(cursor) if index == cursor => EntryStatus::Current,
            _ => EntryStatus::Pending,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.cursor = Some(0);
    }

    /// Move the cursor forward by one; it never moves backwards during a run.
    pub(crate) fn advance(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            *cursor += 1;
        }
    }

    /// End a run: the queue is emptied and the cursor returns to "not running".
    pub(crate) fn finish(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn duplicate_paths_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("a.deb");
        fs::write(&file, b"x").expect("write");

        let mut queue = InstallQueue::new();
        assert!(queue.enqueue_path(&file).expect("enqueue"));
        assert!(!queue.enqueue_path(&file).expect("enqueue again"));
        // Same file reached through a non-normalized path
        let dotted = dir.path().join(".").join("a.deb");
        assert!(!queue.enqueue_path(&dotted).expect("enqueue dotted"));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut queue = InstallQueue::new();
        queue.enqueue_path("/tmp/q/b.rpm").expect("b");
        queue.enqueue_path("/tmp/q/a.deb").expect("a");
        let names: Vec<_> = queue.iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["b.rpm", "a.deb"]);
    }

    #[test]
    fn cursor_tracks_entry_status() {
        let mut queue = InstallQueue::new();
        queue.enqueue_path("/tmp/q/one.deb").expect("one");
        queue.enqueue_path("/tmp/q/two.deb").expect("two");
        queue.enqueue_path("/tmp/q/three.deb").expect("three");
        assert_eq!(queue.cursor(), None);

        queue.begin();
        queue.advance();
        assert_eq!(queue.status_of(0), EntryStatus::Done);
        assert_eq!(queue.status_of(1), EntryStatus::Current);
        assert_eq!(queue.status_of(2), EntryStatus::Pending);
        assert_eq!(queue.current().map(|p| p.name()), Some("two.deb"));

        // No removals mid-run
        assert!(queue.remove(2).is_none());

        queue.finish();
        assert!(queue.is_empty());
        assert!(!queue.is_running());
    }

    #[test]
    fn remove_by_index_when_idle() {
        let mut queue = InstallQueue::new();
        queue.enqueue_path("/tmp/q/one.deb").expect("one");
        queue.enqueue_path("/tmp/q/two.deb").expect("two");
        let removed = queue.remove(0).expect("removed");
        assert_eq!(removed.name(), "one.deb");
        assert_eq!(queue.len(), 1);
        assert!(queue.remove(5).is_none());
    }
}
