//! Single-package install operation
//!
//! Walks one package through validation, optional verification, metadata and
//! tool selection, then hands it to the OS package manager. Progress streams
//! over an mpsc channel while the work runs, and every run ends with exactly
//! one [`InstallEvent::Finished`] carrying the [`InstallResult`].

mod events;
mod stage;

pub use events::{EventSink, InstallEvent};
pub use stage::InstallStage;

use crate::core::types::{InstallResult, PackageRef};
use crate::error::{ErrorCategory, Result, SnapwizError};
use crate::exec::{CommandRunner, ToolProbe, ToolTable};
use crate::packages::{PackageInfo, backend_for, read_metadata};
use crate::ui;
use crate::verify::{VerificationRequest, VerificationResult, verify};
use stage::{VALIDATED_PERCENT, VERIFIED_PERCENT};
use std::fs;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

pub const TIMEOUT_MESSAGE: &str =
    "Installation timed out. The package may be too large or there may be network issues.";

#[derive(Clone)]
pub struct InstallOperation {
    package: PackageRef,
    request: VerificationRequest,
    runner: Arc<dyn CommandRunner>,
    probe: Arc<dyn ToolProbe>,
}

impl InstallOperation {
    pub fn new(
        package: PackageRef,
        request: VerificationRequest,
        runner: Arc<dyn CommandRunner>,
        probe: Arc<dyn ToolProbe>,
    ) -> Self {
        Self {
            package,
            request,
            runner,
            probe,
        }
    }

    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    /// Run on the current thread, streaming events into `sink`.
    ///
    /// Errors never escape: they become the `Failure` sent as the final event
    /// and returned here.
    pub fn run(&self, sink: &EventSink) -> InstallResult {
        let result = match self.execute(sink) {
            Ok(stdout) => InstallResult::Success(success_message(&stdout)),
            Err(e) => {
                sink.status("Installation failed!");
                InstallResult::failure(e.category(), failure_message(&e))
            }
        };
        sink.finish(result.clone());
        result
    }

    /// Run on a worker thread; the caller reads events from the handle.
    pub fn spawn(self) -> InstallHandle {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let sink = EventSink::new(tx);
            self.run(&sink);
        });
        InstallHandle { events: rx, worker }
    }

    fn execute(&self, sink: &EventSink) -> Result<String> {
        let package = &self.package;

        sink.enter(InstallStage::Init);
        sink.status(format!("Starting installation of {}...", package.name()));

        sink.enter(InstallStage::Validating);
        validate(package)?;
        sink.step(
            InstallStage::Validating,
            VALIDATED_PERCENT,
            "Package file is valid",
        );

        if !self.request.is_empty() {
            sink.enter(InstallStage::Verifying);
            sink.status("Checking package integrity and signatures...");
            if let VerificationResult::Fail { check, reason } =
                verify(package, &self.request, self.runner.as_ref())
            {
                return Err(SnapwizError::Verification { check, reason });
            }
            sink.step(
                InstallStage::Verifying,
                VERIFIED_PERCENT,
                "Package verification passed",
            );
        }

        sink.enter(InstallStage::ReadingMetadata);
        let info = read_metadata(self.runner.as_ref(), package);
        sink.status(metadata_summary(&info));

        sink.enter(InstallStage::CheckingDependencies);
        let backend = backend_for(package.format());
        let tools = ToolTable::resolve(self.probe.as_ref(), backend.install_tools());
        let plan = backend.install_plan(&tools, package.path())?;
        ui::verbose(&format!("Install command: {}", plan.command));

        sink.enter(InstallStage::Installing);
        sink.status("Installing package (this may take a while)...");
        let output = self.runner.run(&plan.command)?;

        if !output.success {
            if let Some(repair) = &plan.repair {
                sink.status("Attempting to repair dependencies...");
                match self.runner.run(repair) {
                    Ok(out) if out.success => ui::verbose("Dependency repair finished"),
                    Ok(out) => ui::verbose(&format!(
                        "Dependency repair failed: {}",
                        out.diagnostics().trim()
                    )),
                    Err(e) => ui::verbose(&format!("Dependency repair failed: {}", e)),
                }
            }
            return Err(SnapwizError::CommandFailed {
                command: plan.command.to_string(),
                reason: output.diagnostics().trim().to_string(),
            });
        }

        sink.enter(InstallStage::Configuring);
        sink.enter(InstallStage::Finalizing);
        sink.enter(InstallStage::Done);
        Ok(output.stdout)
    }
}

/// Receiving side of a spawned install
pub struct InstallHandle {
    events: Receiver<InstallEvent>,
    worker: JoinHandle<()>,
}

impl InstallHandle {
    pub fn events(&self) -> &Receiver<InstallEvent> {
        &self.events
    }

    /// Relay every event to `on_event` until the worker is done.
    ///
    /// A worker that dies without reporting still yields a `Failure`.
    pub fn wait<F>(self, mut on_event: F) -> InstallResult
    where
        F: FnMut(&InstallEvent),
    {
        let mut result = None;
        for event in self.events.iter() {
            on_event(&event);
            if let InstallEvent::Finished(finished) = event {
                result = Some(finished);
            }
        }

        let crashed = self.worker.join().is_err();
        match result {
            Some(result) => result,
            None => {
                let failure = InstallResult::failure(
                    ErrorCategory::Other,
                    if crashed {
                        "Error: installation worker crashed"
                    } else {
                        "Error: installation ended without a result"
                    },
                );
                on_event(&InstallEvent::Finished(failure.clone()));
                failure
            }
        }
    }
}

fn validate(package: &PackageRef) -> Result<()> {
    let reason = match fs::metadata(package.path()) {
        Err(_) => "file does not exist",
        Ok(meta) if !meta.is_file() => "not a regular file",
        Ok(_) => return Ok(()),
    };
    Err(SnapwizError::InvalidPackage {
        path: package.path().to_path_buf(),
        reason: reason.to_string(),
    })
}

fn metadata_summary(info: &PackageInfo) -> String {
    let field = |names: &[&str]| {
        info.fields
            .iter()
            .find(|(key, _)| names.contains(&key.as_str()))
            .map(|(_, value)| value.clone())
    };

    match (field(&["Package", "Name"]), field(&["Version"])) {
        (Some(name), Some(version)) => format!("Package: {} {}", name, version),
        (Some(name), None) => format!("Package: {}", name),
        _ => format!("Package: {} ({})", info.file_name, info.format_label),
    }
}

fn success_message(stdout: &str) -> String {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        "Package installed successfully!".to_string()
    } else {
        format!("Package installed successfully!\n\n{}", stdout)
    }
}

fn failure_message(error: &SnapwizError) -> String {
    match error {
        SnapwizError::InvalidPackage { reason, .. } => {
            format!("Invalid package file: {}", reason)
        }
        SnapwizError::Verification { .. } => error.to_string(),
        SnapwizError::CommandFailed { reason, .. } => format!("Installation failed:\n{}", reason),
        SnapwizError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
        SnapwizError::ToolNotFound(message) => message.clone(),
        other => format!("Error: {}", other),
    }
}
