use crate::core::types::VerificationCheck;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapwizError {
    #[error("Invalid package file '{path}': {reason}")]
    InvalidPackage { path: PathBuf, reason: String },

    #[error("Unsupported package format: {0}")]
    UnsupportedFormat(String),

    #[error("Security verification failed ({check}): {reason}")]
    Verification {
        check: VerificationCheck,
        reason: String,
    },

    #[error("System command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("No suitable package manager found: {0}")]
    ToolNotFound(String),

    #[error("Command '{command}' timed out after {seconds} seconds")]
    Timeout { command: String, seconds: u64 },

    #[error("History error at '{path}': {reason}")]
    Persistence { path: PathBuf, reason: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SnapwizError>;

/// Coarse grouping used when presenting failures to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Verification,
    Execution,
    Timeout,
    Persistence,
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "Package Error",
            Self::Verification => "Security Error",
            Self::Execution => "Installation Error",
            Self::Timeout => "Timeout Error",
            Self::Persistence => "History Error",
            Self::Other => "Error",
        };
        f.write_str(label)
    }
}

impl ErrorCategory {
    /// Only a timed out tool is worth retrying as-is; every other failure
    /// needs the user to change something first.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl SnapwizError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPackage { .. } | Self::UnsupportedFormat(_) => ErrorCategory::Validation,
            Self::Verification { .. } => ErrorCategory::Verification,
            Self::CommandFailed { .. } | Self::ToolNotFound(_) => ErrorCategory::Execution,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::Persistence { .. } | Self::IoError { .. } | Self::JsonError(_) => {
                ErrorCategory::Persistence
            }
            Self::StdIoError(_) | Self::ConfigError(_) | Self::Other(_) => ErrorCategory::Other,
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        let invalid = SnapwizError::InvalidPackage {
            path: PathBuf::from("/tmp/a.deb"),
            reason: "missing".into(),
        };
        assert_eq!(invalid.category(), ErrorCategory::Validation);

        let verify = SnapwizError::Verification {
            check: VerificationCheck::Checksum,
            reason: "mismatch".into(),
        };
        assert_eq!(verify.category(), ErrorCategory::Verification);
        assert_eq!(verify.category().to_string(), "Security Error");

        let timeout = SnapwizError::Timeout {
            command: "apt".into(),
            seconds: 300,
        };
        assert_eq!(timeout.category(), ErrorCategory::Timeout);
        assert!(timeout.category().is_retryable());
        assert!(!invalid.category().is_retryable());
    }

    #[test]
    fn timeout_message_mentions_duration() {
        let err = SnapwizError::Timeout {
            command: "dnf install -y x.rpm".into(),
            seconds: 300,
        };
        assert!(err.to_string().contains("timed out after 300 seconds"));
    }
}
