use crate::error::{Result, SnapwizError};
use crate::history::types::HistoryEntry;
use crate::project_identity;
use crate::ui;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const LOCK_TIMEOUT_SECONDS: u64 = 300;

/// Exclusive advisory lock around one read-modify-write of the history file.
pub(super) struct HistoryLock {
    _file: fs::File,
    path: PathBuf,
}

impl Drop for HistoryLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn lock_path_for(history: &Path) -> PathBuf {
    let mut name = history.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

pub(super) fn acquire_lock(history: &Path) -> Result<HistoryLock> {
    let dir = parent_dir(history);
    fs::create_dir_all(dir).map_err(|e| SnapwizError::IoError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let lock_path = lock_path_for(history);

    if lock_path.exists() {
        let age_secs = fs::metadata(&lock_path)
            .ok()
            .and_then(|meta| meta.modified().ok())
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map_or(0, |age| age.as_secs());

        if let Ok(existing) = OpenOptions::new().write(true).open(&lock_path) {
            match existing.try_lock_exclusive() {
                Ok(()) => {
                    if age_secs > LOCK_TIMEOUT_SECONDS {
                        ui::warning("Removing stale history lock file (not actively locked)");
                    }
                    let _ = fs::remove_file(&lock_path);
                }
                Err(_) => {
                    return Err(SnapwizError::persistence(
                        history,
                        format!(
                            "another {} process is writing the history (lock file: {})",
                            project_identity::BINARY_NAME,
                            lock_path.display()
                        ),
                    ));
                }
            }
        }
    }

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .map_err(|e| SnapwizError::IoError {
            path: lock_path.clone(),
            source: e,
        })?;

    lock_file
        .lock_exclusive()
        .map_err(|e| SnapwizError::persistence(history, format!("failed to lock: {}", e)))?;

    let _ = writeln!(&lock_file, "{}", std::process::id());

    Ok(HistoryLock {
        _file: lock_file,
        path: lock_path,
    })
}

/// Read the whole history; a missing file is an empty history.
pub(super) fn read_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| SnapwizError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .map_err(|e| SnapwizError::persistence(path, format!("history file is corrupted: {}", e)))
}

/// Replace the history file atomically (temp file + rename).
pub(super) fn write_entries(path: &Path, entries: &[HistoryEntry]) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).map_err(|e| SnapwizError::IoError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let content = serde_json::to_string_pretty(entries)?;

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file = fs::File::create(&tmp_path).map_err(|e| SnapwizError::IoError {
        path: tmp_path.clone(),
        source: e,
    })?;
    tmp_file.write_all(content.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| SnapwizError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
