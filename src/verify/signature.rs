use crate::constants::SIGNATURE_SUFFIXES;
use crate::core::types::PackageRef;
use crate::error::SnapwizError;
use crate::exec::{CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};

pub const SIGNATURE_TIMEOUT_SECS: u64 = 60;

/// Detached signature next to the package: `<file>.asc`, then `<file>.sig`.
pub fn find_signature_file(package: &Path) -> Option<PathBuf> {
    SIGNATURE_SUFFIXES.iter().find_map(|suffix| {
        let mut candidate = package.as_os_str().to_os_string();
        candidate.push(".");
        candidate.push(suffix);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

pub(super) fn check_signature(
    package: &PackageRef,
    runner: &dyn CommandRunner,
) -> Result<(), String> {
    let Some(signature) = find_signature_file(package.path()) else {
        return Err(format!(
            "no detached signature found for {} (expected .asc or .sig)",
            package.name()
        ));
    };

    let spec = CommandSpec::new(
        "gpg",
        [
            "--batch".to_string(),
            "--verify".to_string(),
            signature.to_string_lossy().into_owned(),
            package.path().to_string_lossy().into_owned(),
        ],
    )
    .timeout_secs(SIGNATURE_TIMEOUT_SECS);

    match runner.run(&spec) {
        Ok(output) if output.success => Ok(()),
        Ok(output) => Err(format!(
            "signature verification failed: {}",
            output.diagnostics().trim()
        )),
        Err(SnapwizError::CommandFailed { .. }) => {
            Err("gpg is not available to verify the signature".to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}
