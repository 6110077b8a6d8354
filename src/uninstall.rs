//! Package removal
//!
//! Removes installed deb/rpm packages by name through the system package
//! manager and records every attempt in history like an install.

use crate::core::types::{InstallResult, PackageFormat};
use crate::error::{ErrorCategory, SnapwizError};
use crate::exec::CommandRunner;
use crate::history::HistoryEntry;
use crate::packages::backend_for;
use crate::traits::HistoryLog;
use crate::utils::sanitize::validate_package_name;

pub const UNINSTALL_SUCCESS_MESSAGE: &str = "Package uninstalled successfully";

/// Remove one package. Never returns an error: every problem becomes a
/// `Failure`, and every attempt that reached the package manager is logged.
pub fn uninstall(
    name: &str,
    format: PackageFormat,
    runner: &dyn CommandRunner,
    history: &dyn HistoryLog,
) -> InstallResult {
    let name = name.trim();
    if let Err(e) = validate_package_name(name) {
        return InstallResult::failure(ErrorCategory::Validation, e.to_string());
    }

    let Some(spec) = backend_for(format).uninstall_command(name) else {
        return InstallResult::failure(
            ErrorCategory::Validation,
            format!("Uninstall is not supported for {} packages", format),
        );
    };

    let result = match runner.run(&spec) {
        Ok(output) if output.success => {
            InstallResult::Success(UNINSTALL_SUCCESS_MESSAGE.to_string())
        }
        Ok(output) => InstallResult::failure(
            ErrorCategory::Execution,
            format!("Uninstallation failed: {}", output.diagnostics().trim()),
        ),
        Err(SnapwizError::Timeout { seconds, .. }) => InstallResult::failure(
            ErrorCategory::Timeout,
            format!("Uninstallation timed out after {} seconds", seconds),
        ),
        Err(e) => InstallResult::failure(e.category(), format!("Uninstallation failed: {}", e)),
    };

    history.record(HistoryEntry::now(
        name,
        name,
        result.is_success(),
        result.message(),
    ));
    result
}

/// Remove several packages one after another.
pub fn uninstall_all(
    names: &[String],
    format: PackageFormat,
    runner: &dyn CommandRunner,
    history: &dyn HistoryLog,
) -> Vec<(String, InstallResult)> {
    names
        .iter()
        .map(|name| (name.clone(), uninstall(name, format, runner, history)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{ScriptedRunner, failed, ok, timed_out};
    use crate::traits::MemoryHistory;

    #[test]
    fn deb_removal_uses_apt_and_is_logged() {
        let runner = ScriptedRunner::succeeding("Removing vim ...");
        let history = MemoryHistory::new();

        let result = uninstall("vim", PackageFormat::Deb, &runner, &history);
        assert_eq!(
            result,
            InstallResult::Success(UNINSTALL_SUCCESS_MESSAGE.to_string())
        );

        let calls = runner.calls();
        assert_eq!(calls[0].to_string(), "apt remove -y vim");
        assert!(calls[0].privileged);
        assert_eq!(calls[0].timeout.as_secs(), 120);

        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].package_name, "vim");
        assert!(entries[0].success);
    }

    #[test]
    fn rpm_failure_carries_stderr() {
        let runner = ScriptedRunner::new(|_| Ok(failed("No match for argument: nope")));
        let history = MemoryHistory::new();

        let result = uninstall("nope", PackageFormat::Rpm, &runner, &history);
        assert_eq!(
            result.message(),
            "Uninstallation failed: No match for argument: nope"
        );
        assert_eq!(runner.command_lines(), vec!["dnf remove -y nope"]);
        assert!(!history.entries()[0].success);
    }

    #[test]
    fn unsafe_names_never_reach_the_runner() {
        let runner = ScriptedRunner::succeeding("");
        let history = MemoryHistory::new();

        let result = uninstall("vim; reboot", PackageFormat::Deb, &runner, &history);
        assert_eq!(result.category(), Some(ErrorCategory::Validation));
        assert!(runner.calls().is_empty());
        assert!(history.entries().is_empty());
    }

    #[test]
    fn snap_removal_is_unsupported() {
        let runner = ScriptedRunner::succeeding("");
        let result = uninstall("hello", PackageFormat::Snap, &runner, &MemoryHistory::new());
        assert!(result.message().contains("not supported"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn timeout_is_reported() {
        let runner = ScriptedRunner::new(|spec| Err(timed_out(spec)));
        let history = MemoryHistory::new();
        let result = uninstall("big", PackageFormat::Deb, &runner, &history);
        assert!(result.message().contains("timed out after 120 seconds"));
        assert_eq!(result.category(), Some(ErrorCategory::Timeout));
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn several_names_run_in_order() {
        let runner = ScriptedRunner::new(|spec| {
            if spec.args.last().is_some_and(|n| n == "bad") {
                Ok(failed("E: Unable to locate package bad"))
            } else {
                Ok(ok(""))
            }
        });
        let history = MemoryHistory::new();
        let names = vec!["a".to_string(), "bad".to_string(), "c".to_string()];

        let results = uninstall_all(&names, PackageFormat::Deb, &runner, &history);
        let outcomes: Vec<_> = results.iter().map(|(n, r)| (n.as_str(), r.is_success())).collect();
        assert_eq!(outcomes, vec![("a", true), ("bad", false), ("c", true)]);
        assert_eq!(history.entries().len(), 3);
    }
}
