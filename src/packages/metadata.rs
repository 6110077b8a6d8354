//! Package header inspection
//!
//! Wraps `dpkg-deb -I` / `rpm -qip` and keeps the interesting fields. When the
//! tool is missing or fails, only the file name and size are reported.

use crate::core::types::PackageRef;
use crate::exec::CommandRunner;
use crate::packages::registry::backend_for;
use regex::Regex;
use std::fmt;
use std::fs;
use std::sync::LazyLock;

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z -]*?)\s*:\s?(.*)$").expect("Invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub format_label: &'static str,
    pub file_name: String,
    pub size_bytes: Option<u64>,
    /// Selected header fields, in the order the tool printed them
    pub fields: Vec<(String, String)>,
    pub note: Option<String>,
}

/// Read what the OS tooling can tell about a package file.
pub fn read_metadata(runner: &dyn CommandRunner, package: &PackageRef) -> PackageInfo {
    let backend = backend_for(package.format());
    let mut info = PackageInfo {
        format_label: package.format().display_name(),
        file_name: package.name().to_string(),
        size_bytes: fs::metadata(package.path()).ok().map(|m| m.len()),
        fields: Vec::new(),
        note: None,
    };

    let Some(spec) = backend.metadata_command(package.path()) else {
        return info;
    };

    match runner.run(&spec) {
        Ok(output) if output.success => {
            info.fields = parse_fields(&output.stdout, backend.metadata_fields());
        }
        Ok(_) => {}
        Err(crate::error::SnapwizError::CommandFailed { .. }) => {
            info.note = Some(format!(
                "{} not found. Install it for detailed package info.",
                spec.program
            ));
        }
        Err(e) => {
            info.note = Some(e.to_string());
        }
    }

    info
}

fn parse_fields(stdout: &str, wanted: &[&str]) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();

    for line in stdout.lines() {
        let Some(caps) = HEADER_LINE.captures(line) else {
            continue;
        };
        let key = caps[1].trim();
        if !wanted.contains(&key) || fields.iter().any(|(k, _)| k == key) {
            continue;
        }
        fields.push((key.to_string(), caps[2].trim().to_string()));
    }

    fields
}

/// Human-readable byte count, two decimals, B through TB.
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}

impl fmt::Display for PackageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Package Type: {}", self.format_label)?;
        writeln!(f)?;

        if self.fields.is_empty() {
            writeln!(f, "Filename: {}", self.file_name)?;
            if let Some(size) = self.size_bytes {
                writeln!(f, "Size: {}", human_size(size))?;
            }
        } else {
            for (key, value) in &self.fields {
                writeln!(f, "{}: {}", key, value)?;
            }
        }

        if let Some(note) = &self.note {
            writeln!(f)?;
            writeln!(f, "Note: {}", note)?;
        }
        Ok(())
    }
}
