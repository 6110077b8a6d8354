//! Pre-install verification pipeline
//!
//! Runs the requested subset of checks in a fixed order
//! (integrity, checksum, signature) and stops at the first failure.

mod checksum;
mod signature;

pub use checksum::{ChecksumAlgorithm, file_digest};
pub use signature::{SIGNATURE_TIMEOUT_SECS, find_signature_file};

use crate::constants::is_supported_package;
use crate::core::types::{PackageRef, VerificationCheck};
use crate::exec::CommandRunner;
use std::fmt;
use std::fs;

/// Expected digest supplied by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub value: String,
    pub algorithm: ChecksumAlgorithm,
}

impl Checksum {
    pub fn new(value: impl Into<String>, algorithm: ChecksumAlgorithm) -> Self {
        Self {
            value: value.into(),
            algorithm,
        }
    }
}

/// Which checks to run before installing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRequest {
    pub integrity: bool,
    pub signature: bool,
    pub checksum: Option<Checksum>,
}

impl VerificationRequest {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn integrity() -> Self {
        Self {
            integrity: true,
            ..Self::default()
        }
    }

    pub fn with_signature(mut self, signature: bool) -> Self {
        self.signature = signature;
        self
    }

    /// Blank checksum values are treated as "no checksum requested".
    pub fn with_checksum(mut self, checksum: Option<Checksum>) -> Self {
        self.checksum = checksum.filter(|c| !c.value.trim().is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.integrity && !self.signature && self.checksum.is_none()
    }

    /// Same request with the manual checksum dropped (used for batches).
    pub fn without_checksum(&self) -> Self {
        Self {
            checksum: None,
            ..self.clone()
        }
    }
}

/// Outcome of the pipeline; only the first failing check is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Pass,
    Fail {
        check: VerificationCheck,
        reason: String,
    },
}

impl VerificationResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    fn fail(check: VerificationCheck, reason: impl Into<String>) -> Self {
        Self::Fail {
            check,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "all requested checks passed"),
            Self::Fail { check, reason } => write!(f, "{} check failed: {}", check, reason),
        }
    }
}

/// Run the requested checks against `package`.
///
/// Read-only apart from spawning the signature verifier.
pub fn verify(
    package: &PackageRef,
    request: &VerificationRequest,
    runner: &dyn CommandRunner,
) -> VerificationResult {
    if request.is_empty() {
        return VerificationResult::Pass;
    }

    if request.integrity
        && let Err(reason) = check_integrity(package)
    {
        return VerificationResult::fail(VerificationCheck::Integrity, reason);
    }

    if let Some(expected) = &request.checksum
        && let Err(reason) = check_checksum(package, expected)
    {
        return VerificationResult::fail(VerificationCheck::Checksum, reason);
    }

    if request.signature
        && let Err(reason) = signature::check_signature(package, runner)
    {
        return VerificationResult::fail(VerificationCheck::Signature, reason);
    }

    VerificationResult::Pass
}

fn check_integrity(package: &PackageRef) -> Result<(), String> {
    let path = package.path();
    let detail = match fs::metadata(path) {
        Err(_) => Some("file does not exist"),
        Ok(meta) if !meta.is_file() => Some("not a regular file"),
        Ok(meta) if meta.len() == 0 => Some("file is empty"),
        Ok(_) if !is_supported_package(path) => Some("unrecognized package extension"),
        Ok(_) => None,
    };

    match detail {
        Some(detail) => Err(format!("invalid or corrupted package file ({})", detail)),
        None => Ok(()),
    }
}

fn check_checksum(package: &PackageRef, expected: &Checksum) -> Result<(), String> {
    let computed = file_digest(package.path(), expected.algorithm).map_err(|e| {
        format!(
            "could not compute {} checksum of {}: {}",
            expected.algorithm,
            package.name(),
            e
        )
    })?;

    let expected_hex = expected.value.trim().to_lowercase();
    if computed != expected_hex {
        return Err(format!(
            "{} checksum mismatch: expected {}, computed {}",
            expected.algorithm, expected_hex, computed
        ));
    }
    Ok(())
}
