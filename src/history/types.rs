use crate::constants::{HISTORY_DATE_FORMAT, HISTORY_TIMESTAMP_FORMAT};
use crate::core::types::{InstallResult, PackageFormat, PackageRef};
use crate::error::{Result, SnapwizError};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One recorded install or uninstall attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// Full path of the package file (or the package name for uninstalls)
    #[serde(default)]
    pub package: String,
    pub package_name: String,
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl HistoryEntry {
    /// New entry stamped with the current local time.
    pub fn now(
        package: impl Into<String>,
        package_name: impl Into<String>,
        success: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now().format(HISTORY_TIMESTAMP_FORMAT).to_string(),
            package: package.into(),
            package_name: package_name.into(),
            success,
            message: message.into(),
        }
    }

    pub fn for_install(package: &PackageRef, result: &InstallResult) -> Self {
        Self::now(
            package.path().to_string_lossy(),
            package.name(),
            result.is_success(),
            result.message(),
        )
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, HISTORY_TIMESTAMP_FORMAT).ok()
    }

    pub fn status_label(&self) -> &'static str {
        if self.success { "Success" } else { "Failed" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Success,
    Failed,
}

impl FromStr for StatusFilter {
    type Err = SnapwizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "success" | "successful" | "ok" => Ok(Self::Success),
            "failed" | "failure" | "fail" => Ok(Self::Failed),
            other => Err(SnapwizError::ConfigError(format!(
                "Unknown status '{}'. Valid: success, failed",
                other
            ))),
        }
    }
}

/// Criteria for [`HistoryStore::filter`](super::HistoryStore::filter).
///
/// Every set field must match; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub status: Option<StatusFilter>,
    pub package_type: Option<PackageFormat>,
    /// Both bounds are inclusive and compared against midnight at the start
    /// of the day, so `date_to` keeps only entries up to 00:00:00 of that day
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(status) = self.status {
            let wanted = status == StatusFilter::Success;
            if entry.success != wanted {
                return false;
            }
        }

        if let Some(format) = self.package_type {
            let suffix = format!(".{}", format.extension());
            if !entry.package_name.to_lowercase().ends_with(&suffix) {
                return false;
            }
        }

        if self.date_from.is_some() || self.date_to.is_some() {
            // Entries with an unreadable timestamp cannot satisfy a date bound
            let Some(at) = entry.recorded_at() else {
                return false;
            };
            if self.date_from.is_some_and(|from| at < from.and_time(NaiveTime::MIN)) {
                return false;
            }
            if self.date_to.is_some_and(|to| at > to.and_time(NaiveTime::MIN)) {
                return false;
            }
        }

        true
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), HISTORY_DATE_FORMAT).map_err(|e| {
        SnapwizError::ConfigError(format!(
            "Invalid date '{}' (expected YYYY-MM-DD): {}",
            value, e
        ))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess from a file extension; anything but `.csv` is JSON.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = SnapwizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(SnapwizError::ConfigError(format!(
                "Unknown export format '{}'. Valid: csv, json",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Wrapped JSON export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryExport {
    pub export_date: String,
    pub total_entries: usize,
    pub entries: Vec<HistoryEntry>,
}

/// Anything `import` accepts: a bare array or the wrapped export
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ImportDocument {
    Entries(Vec<HistoryEntry>),
    Wrapped { entries: Vec<HistoryEntry> },
}

impl ImportDocument {
    pub(crate) fn into_entries(self) -> Vec<HistoryEntry> {
        match self {
            Self::Entries(entries) | Self::Wrapped { entries } => entries,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistoryStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    /// Percentage, 0.0 when there is no history
    pub success_rate: f64,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let total = entries.len();
        let successful = entries.iter().filter(|e| e.success).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            successful as f64 / total as f64 * 100.0
        };
        Self {
            total,
            successful,
            failed: total - successful,
            success_rate,
        }
    }
}
