use crate::constants::HISTORY_TIMESTAMP_FORMAT;
use crate::error::{Result, SnapwizError};
use crate::history::persist::{acquire_lock, read_entries, write_entries};
use crate::history::types::{
    ExportFormat, HistoryEntry, HistoryExport, HistoryFilter, HistoryStats, ImportDocument,
};
use crate::traits::HistoryLog;
use crate::ui;
use crate::utils::paths;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable, ordered log of install and uninstall attempts.
///
/// The JSON file is the only state: every call reads it, and every mutation
/// rewrites it whole under an exclusive lock. `append` reports a failure
/// through `ui` and returns a success flag; the other methods return the
/// underlying error.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the default history file in the config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(paths::history_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry, oldest first. Empty when the file is missing or unreadable.
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                ui::warning(&format!("Could not read history: {}", e));
                Vec::new()
            }
        }
    }

    pub fn try_append(&self, entry: HistoryEntry) -> Result<()> {
        self.mutate(|entries| {
            entries.push(entry);
            Ok(())
        })
    }

    pub fn append(&self, entry: HistoryEntry) -> bool {
        match self.try_append(entry) {
            Ok(()) => true,
            Err(e) => {
                ui::warning(&format!("Failed to save history entry: {}", e));
                false
            }
        }
    }

    pub fn filter(&self, filter: &HistoryFilter) -> Vec<HistoryEntry> {
        self.get_all()
            .into_iter()
            .filter(|entry| filter.matches(entry))
            .collect()
    }

    /// Case-insensitive substring match on display name or full path.
    pub fn search(&self, query: &str) -> Vec<HistoryEntry> {
        let query = query.to_lowercase();
        self.get_all()
            .into_iter()
            .filter(|entry| {
                entry.package_name.to_lowercase().contains(&query)
                    || entry.package.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_entries(&self.get_all())
    }

    /// Write the history to `dest`; returns the number of exported entries.
    pub fn try_export(&self, dest: &Path, format: ExportFormat) -> Result<usize> {
        let entries = read_entries(&self.path)?;
        let count = entries.len();
        let content = match format {
            ExportFormat::Csv => to_csv(&entries),
            ExportFormat::Json => {
                let document = HistoryExport {
                    export_date: Local::now().format(HISTORY_TIMESTAMP_FORMAT).to_string(),
                    total_entries: count,
                    entries,
                };
                serde_json::to_string_pretty(&document)?
            }
        };

        fs::write(dest, content).map_err(|e| SnapwizError::IoError {
            path: dest.to_path_buf(),
            source: e,
        })?;
        Ok(count)
    }

    /// Load entries from `source`, appending when `merge` is set and
    /// replacing the history otherwise. Returns the number imported.
    ///
    /// Nothing is written when `source` cannot be parsed.
    pub fn try_import(&self, source: &Path, merge: bool) -> Result<usize> {
        let content = fs::read_to_string(source).map_err(|e| SnapwizError::IoError {
            path: source.to_path_buf(),
            source: e,
        })?;
        let imported = serde_json::from_str::<ImportDocument>(&content)
            .map_err(|_| {
                SnapwizError::persistence(
                    source,
                    "invalid history file format (expected a list of entries or an export with 'entries')",
                )
            })?
            .into_entries();

        let count = imported.len();
        self.mutate(|entries| {
            if !merge {
                entries.clear();
            }
            entries.extend(imported);
            Ok(())
        })?;
        Ok(count)
    }

    pub fn try_clear(&self) -> Result<()> {
        let _lock = acquire_lock(&self.path)?;
        write_entries(&self.path, &[])
    }

    /// Locked read-modify-write of the whole file.
    ///
    /// A corrupted file is treated as empty so new entries are not lost.
    fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<HistoryEntry>) -> Result<()>,
    {
        let _lock = acquire_lock(&self.path)?;
        let mut entries = match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e @ SnapwizError::Persistence { .. }) => {
                ui::warning(&format!("{}; starting a fresh history", e));
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut entries)?;
        write_entries(&self.path, &entries)
    }
}

impl HistoryLog for HistoryStore {
    fn record(&self, entry: HistoryEntry) -> bool {
        self.append(entry)
    }
}

const CSV_HEADER: &str = "timestamp,package_name,success,message";

/// Empty history exports as an empty file, without a header row.
fn to_csv(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::from(CSV_HEADER);
    out.push_str("\r\n");
    for entry in entries {
        let row = [
            entry.timestamp.as_str(),
            entry.package_name.as_str(),
            entry.status_label(),
            entry.message.as_str(),
        ];
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
