use crate::error::{ErrorCategory, Result, SnapwizError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// Package artifact formats that can be handed to an OS installer.
// To add a format, add a variant here and update:
// - PackageFormat::extension()
// - SUPPORTED_EXTENSIONS in constants::formats
// - packages::registry::backend_for()
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageFormat {
    Deb,
    Rpm,
    Snap,
    Flatpak,
}

impl PackageFormat {
    pub const ALL: [PackageFormat; 4] = [Self::Deb, Self::Rpm, Self::Snap, Self::Flatpak];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Deb => "deb",
            Self::Rpm => "rpm",
            Self::Snap => "snap",
            Self::Flatpak => "flatpak",
        }
    }

    /// Derive the format from a path's final extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Deb => "Debian (.deb)",
            Self::Rpm => "RPM (.rpm)",
            Self::Snap => "Snap (.snap)",
            Self::Flatpak => "Flatpak bundle (.flatpak)",
        }
    }
}

impl fmt::Display for PackageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for PackageFormat {
    type Err = SnapwizError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "deb" => Ok(Self::Deb),
            "rpm" => Ok(Self::Rpm),
            "snap" => Ok(Self::Snap),
            "flatpak" => Ok(Self::Flatpak),
            _ => Err(SnapwizError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Identifier for one package file on disk.
///
/// Immutable once built: the path is made absolute (and resolved through
/// symlinks when the file exists), the format comes from the extension and
/// the display name is the file's basename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    path: PathBuf,
    format: PackageFormat,
    name: String,
}

impl PackageRef {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref();
        let format = PackageFormat::from_path(raw).ok_or_else(|| SnapwizError::InvalidPackage {
            path: raw.to_path_buf(),
            reason: "unsupported package extension".to_string(),
        })?;

        let resolved = match raw.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => std::path::absolute(raw).map_err(|e| SnapwizError::IoError {
                path: raw.to_path_buf(),
                source: e,
            })?,
        };

        let name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SnapwizError::InvalidPackage {
                path: raw.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;

        Ok(Self {
            path: resolved,
            format,
            name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> PackageFormat {
        self.format
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Individual checks the verification pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationCheck {
    Integrity,
    Checksum,
    Signature,
}

impl fmt::Display for VerificationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integrity => write!(f, "integrity"),
            Self::Checksum => write!(f, "checksum"),
            Self::Signature => write!(f, "signature"),
        }
    }
}

/// Terminal outcome of an install or uninstall attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallResult {
    /// Carries the tool's captured stdout
    Success(String),
    /// Captured diagnostics or a verification/validation reason, tagged with
    /// the kind of failure so observers can tell security rejections apart
    Failure {
        category: ErrorCategory,
        message: String,
    },
}

impl InstallResult {
    pub fn failure(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Failure {
            category,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure { message, .. } => message,
        }
    }

    /// `None` for a success
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Success(_) => None,
            Self::Failure { category, .. } => Some(*category),
        }
    }
}
