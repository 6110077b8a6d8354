//! Batch Command
//!
//! Queues several package files and installs them one after another,
//! asking what to do when one fails.

use super::install::{ProgressView, verification_request, warn_without_privileges};
use crate::batch::{
    BatchDecision, BatchObserver, BatchOrchestrator, BatchReport, BatchState, CancelHandle,
};
use crate::config::settings::Settings;
use crate::core::queue::InstallQueue;
use crate::core::types::{InstallResult, PackageRef};
use crate::error::{Result, SnapwizError};
use crate::install::InstallEvent;
use crate::traits::{AppContext, HistoryLog};
use crate::ui as output;
use std::path::PathBuf;
use std::sync::Arc;

pub struct BatchOptions {
    pub files: Vec<PathBuf>,
    pub integrity: Option<bool>,
    pub signature: bool,
    pub abort_on_failure: bool,
    pub yes: bool,
}

/// How the command answers "continue after a failure?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailurePolicy {
    Abort,
    Continue,
    Ask,
}

impl FailurePolicy {
    pub(crate) fn resolve(abort_on_failure: bool, yes: bool, interactive: bool) -> Self {
        if abort_on_failure {
            Self::Abort
        } else if yes || !interactive {
            Self::Continue
        } else {
            Self::Ask
        }
    }
}

pub fn run(ctx: &AppContext, cancel: CancelHandle, options: BatchOptions) -> Result<()> {
    let settings = Settings::load()?;
    let request = verification_request(settings.values(), options.integrity, options.signature);

    let queue = build_queue(&options.files);
    if queue.is_empty() {
        return Err(SnapwizError::Other(
            "No installable package files were given".to_string(),
        ));
    }

    output::header(&format!("Installing {} packages", queue.len()));
    warn_without_privileges(ctx);

    let history: Arc<dyn HistoryLog> = ctx.history.clone();
    let orchestrator = BatchOrchestrator::new(ctx.runner.clone(), ctx.probe.clone(), history);
    let mut state = BatchState::with_cancel(queue, cancel);
    let mut observer = ConsoleObserver {
        policy: FailurePolicy::resolve(
            options.abort_on_failure,
            options.yes,
            output::is_interactive(),
        ),
        view: None,
    };

    let report = orchestrator.run_batch(&mut state, &request, &mut observer);

    if report.failed() > 0 || report.cancelled {
        return Err(SnapwizError::Other(format!(
            "{} of {} packages were not installed",
            report.failed() + report.skipped,
            report.results.len() + report.skipped
        )));
    }
    Ok(())
}

/// Queue the given files in order; unsupported and duplicate paths are skipped.
fn build_queue(files: &[PathBuf]) -> InstallQueue {
    let mut queue = InstallQueue::new();
    for file in files {
        match queue.enqueue_path(file) {
            Ok(true) => {}
            Ok(false) => {
                output::warning(&format!("Skipping duplicate: {}", file.display()));
            }
            Err(e) => output::warning(&format!("Skipping {}", e)),
        }
    }
    queue
}

struct ConsoleObserver {
    policy: FailurePolicy,
    view: Option<ProgressView>,
}

impl BatchObserver for ConsoleObserver {
    fn item_started(&mut self, index: usize, total: usize, package: &PackageRef) {
        output::info(&format!("[{}/{}] {}", index + 1, total, package.name()));
        self.view = Some(ProgressView::new(package.name()));
    }

    fn install_event(&mut self, _index: usize, event: &InstallEvent) {
        if let Some(view) = self.view.as_mut() {
            view.on_event(event);
        }
    }

    fn item_finished(
        &mut self,
        _index: usize,
        _total: usize,
        package: &PackageRef,
        result: &InstallResult,
        _recorded: bool,
    ) {
        self.view = None;
        match result {
            InstallResult::Success(_) => output::success(&format!("{} installed", package.name())),
            InstallResult::Failure { category, message } => {
                output::error(&format!("{} failed ({})", package.name(), category));
                for line in message.lines().filter(|l| !l.trim().is_empty()) {
                    output::indent(line, 2);
                }
            }
        }
    }

    fn decide_on_failure(
        &mut self,
        package: &PackageRef,
        _result: &InstallResult,
    ) -> BatchDecision {
        match self.policy {
            FailurePolicy::Abort => BatchDecision::Abort,
            FailurePolicy::Continue => BatchDecision::Continue,
            FailurePolicy::Ask => {
                if output::prompt_yes_no(&format!(
                    "{} failed. Continue with the remaining packages?",
                    package.name()
                )) {
                    BatchDecision::Continue
                } else {
                    BatchDecision::Abort
                }
            }
        }
    }

    fn batch_finished(&mut self, report: &BatchReport) {
        output::separator();
        output::keyval("Installed", &report.succeeded().to_string());
        output::keyval("Failed", &report.failed().to_string());
        if report.skipped > 0 {
            output::keyval("Skipped", &report.skipped.to_string());
        }
        if report.cancelled {
            output::warning("Batch stopped before all packages were attempted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn abort_flag_wins() {
        assert_eq!(FailurePolicy::resolve(true, true, true), FailurePolicy::Abort);
        assert_eq!(FailurePolicy::resolve(true, false, false), FailurePolicy::Abort);
    }

    #[test]
    fn yes_or_no_terminal_means_continue() {
        assert_eq!(FailurePolicy::resolve(false, true, true), FailurePolicy::Continue);
        assert_eq!(FailurePolicy::resolve(false, false, false), FailurePolicy::Continue);
    }

    #[test]
    fn interactive_run_asks() {
        assert_eq!(FailurePolicy::resolve(false, false, true), FailurePolicy::Ask);
    }

    #[test]
    fn queue_skips_duplicates_and_unsupported_files() {
        let dir = tempdir().expect("tempdir");
        let deb = dir.path().join("a.deb");
        let zip = dir.path().join("b.zip");
        fs::write(&deb, b"x").expect("write");
        fs::write(&zip, b"x").expect("write");

        let queue = build_queue(&[deb.clone(), zip, deb]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(0).map(|p| p.name()), Some("a.deb"));
    }
}
