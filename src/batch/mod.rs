//! Batch orchestrator
//!
//! Installs the packages of an [`InstallQueue`] one at a time. Each result is
//! written to history before the cursor moves on, a failure asks the observer
//! whether to keep going, and cancellation is honoured between items only.

use crate::core::queue::InstallQueue;
use crate::core::types::{InstallResult, PackageRef};
use crate::exec::{CommandRunner, ToolProbe};
use crate::history::HistoryEntry;
use crate::install::{InstallEvent, InstallOperation};
use crate::traits::HistoryLog;
use crate::ui;
use crate::verify::VerificationRequest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What to do after a package in the middle of a batch fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchDecision {
    #[default]
    Continue,
    Abort,
}

/// Shared cancellation flag, checked at item boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Supervisory state for one run; not persisted.
#[derive(Debug, Default)]
pub struct BatchState {
    pub queue: InstallQueue,
    cancel: CancelHandle,
    last_decision: Option<BatchDecision>,
}

impl BatchState {
    pub fn new(queue: InstallQueue) -> Self {
        Self::with_cancel(queue, CancelHandle::new())
    }

    /// State wired to an existing cancel handle (e.g. a Ctrl-C handler).
    pub fn with_cancel(queue: InstallQueue, cancel: CancelHandle) -> Self {
        Self {
            queue,
            cancel,
            last_decision: None,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn last_decision(&self) -> Option<BatchDecision> {
        self.last_decision
    }
}

/// Receives batch progress on the orchestrator's thread.
///
/// Every hook has a no-op default; an observer that does not answer failure
/// prompts lets the batch continue.
pub trait BatchObserver {
    fn item_started(&mut self, _index: usize, _total: usize, _package: &PackageRef) {}

    fn install_event(&mut self, _index: usize, _event: &InstallEvent) {}

    /// Called after the result has been handed to history.
    fn item_finished(
        &mut self,
        _index: usize,
        _total: usize,
        _package: &PackageRef,
        _result: &InstallResult,
        _recorded: bool,
    ) {
    }

    fn decide_on_failure(
        &mut self,
        _package: &PackageRef,
        _result: &InstallResult,
    ) -> BatchDecision {
        BatchDecision::Continue
    }

    fn batch_finished(&mut self, _report: &BatchReport) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One pair per attempted package, in queue order
    pub results: Vec<(PackageRef, InstallResult)>,
    /// Packages never attempted because the run was cancelled
    pub skipped: usize,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

pub struct BatchOrchestrator {
    runner: Arc<dyn CommandRunner>,
    probe: Arc<dyn ToolProbe>,
    history: Arc<dyn HistoryLog>,
}

impl BatchOrchestrator {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        probe: Arc<dyn ToolProbe>,
        history: Arc<dyn HistoryLog>,
    ) -> Self {
        Self {
            runner,
            probe,
            history,
        }
    }

    /// Install every queued package in order.
    ///
    /// A manual checksum in `request` is ignored: one digest cannot describe
    /// several files. The queue is emptied when the run ends, whether it
    /// completed or was cancelled.
    pub fn run_batch(
        &self,
        state: &mut BatchState,
        request: &VerificationRequest,
        observer: &mut dyn BatchObserver,
    ) -> BatchReport {
        let request = request.without_checksum();
        let total = state.queue.len();
        let mut report = BatchReport::default();

        state.queue.begin();
        loop {
            let Some(index) = state.queue.cursor().filter(|&i| i < total) else {
                break;
            };
            if state.cancel.is_cancelled() {
                report.cancelled = true;
                report.skipped = total - index;
                break;
            }
            let Some(package) = state.queue.get(index).cloned() else {
                break;
            };

            observer.item_started(index, total, &package);

            let operation = InstallOperation::new(
                package.clone(),
                request.clone(),
                Arc::clone(&self.runner),
                Arc::clone(&self.probe),
            );
            let result = operation
                .spawn()
                .wait(|event| observer.install_event(index, event));

            let recorded = self
                .history
                .record(HistoryEntry::for_install(&package, &result));
            if !recorded {
                ui::warning(&format!("History entry for {} was not saved", package));
            }
            observer.item_finished(index, total, &package, &result, recorded);

            let is_last = index + 1 == total;
            if !result.is_success() && !is_last {
                let decision = observer.decide_on_failure(&package, &result);
                state.last_decision = Some(decision);
                if decision == BatchDecision::Abort {
                    state.cancel.cancel();
                }
            }

            report.results.push((package, result));
            state.queue.advance();
        }

        state.queue.finish();
        observer.batch_finished(&report);
        report
    }
}
