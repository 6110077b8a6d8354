//! Install Command
//!
//! Installs one package file with a live progress bar and records the
//! outcome in history.

use crate::config::settings::{Settings, SettingsValues};
use crate::core::types::{InstallResult, PackageRef};
use crate::error::{ErrorCategory, Result, SnapwizError};
use crate::exec::has_install_privileges;
use crate::history::HistoryEntry;
use crate::install::{InstallEvent, InstallOperation};
use crate::traits::AppContext;
use crate::ui as output;
use crate::ui::progress::ProgressBar;
use crate::verify::{Checksum, ChecksumAlgorithm, VerificationRequest};
use std::path::PathBuf;

pub struct InstallOptions {
    pub file: PathBuf,
    /// `Some` when `--integrity`/`--no-integrity` overrides the setting
    pub integrity: Option<bool>,
    pub signature: bool,
    pub checksum: Option<String>,
    pub algorithm: ChecksumAlgorithm,
}

pub fn run(ctx: &AppContext, options: InstallOptions) -> Result<()> {
    let settings = Settings::load()?;
    let package = PackageRef::new(&options.file)?;
    let request = verification_request(settings.values(), options.integrity, options.signature)
        .with_checksum(
            options
                .checksum
                .map(|value| Checksum::new(value, options.algorithm)),
        );

    output::header(&format!("Installing {}", package.name()));
    warn_without_privileges(ctx);
    describe_request(&request);

    let operation = InstallOperation::new(
        package.clone(),
        request,
        ctx.runner.clone(),
        ctx.probe.clone(),
    );

    let mut view = ProgressView::new(package.name());
    let result = operation.spawn().wait(|event| view.on_event(event));

    if !ctx.history.append(HistoryEntry::for_install(&package, &result)) {
        output::warning("Installation result was not saved to history");
    }

    match result {
        InstallResult::Success(message) => {
            report_success(&message);
            Ok(())
        }
        InstallResult::Failure { category, message } => {
            if category.is_retryable() {
                output::info("The package manager timed out; installing again may succeed");
            }
            Err(SnapwizError::Other(failure_text(category, &message)))
        }
    }
}

/// Failure text led by its category label, e.g. "Security Error: ..."
pub(crate) fn failure_text(category: ErrorCategory, message: &str) -> String {
    format!("{}: {}", category, message)
}

/// Effective verification switches: settings first, then command-line overrides.
///
/// Integrity follows the setting unless overridden; signature checking is on
/// when either the setting or the flag asks for it.
pub(crate) fn verification_request(
    values: &SettingsValues,
    integrity: Option<bool>,
    signature: bool,
) -> VerificationRequest {
    VerificationRequest {
        integrity: integrity.unwrap_or(values.verify_integrity),
        signature: values.verify_signature || signature,
        checksum: None,
    }
}

pub(crate) fn warn_without_privileges(ctx: &AppContext) {
    if !has_install_privileges(ctx.probe.as_ref()) {
        output::warning("Neither pkexec nor sudo was found; installing will likely fail");
    }
}

fn describe_request(request: &VerificationRequest) {
    if request.is_empty() {
        output::verbose("No verification requested");
        return;
    }
    let mut checks = Vec::new();
    if request.integrity {
        checks.push("integrity".to_string());
    }
    if let Some(checksum) = &request.checksum {
        checks.push(format!("{} checksum", checksum.algorithm));
    }
    if request.signature {
        checks.push("signature".to_string());
    }
    output::verbose(&format!("Verifying: {}", checks.join(", ")));
}

fn report_success(message: &str) {
    let mut lines = message.splitn(2, '\n');
    output::success(lines.next().unwrap_or(message));
    if let Some(details) = lines.next()
        && output::is_verbose()
    {
        for line in details.trim().lines() {
            output::indent(line, 1);
        }
    }
}

/// Progress bar driven by install events
pub(crate) struct ProgressView {
    bar: Option<ProgressBar>,
}

impl ProgressView {
    pub(crate) fn new(label: &str) -> Self {
        let bar = (!output::is_quiet()).then(|| ProgressBar::new(label));
        Self { bar }
    }

    pub(crate) fn on_event(&mut self, event: &InstallEvent) {
        match event {
            InstallEvent::Step {
                percent, message, ..
            } => {
                if let Some(bar) = self.bar.as_mut() {
                    bar.set(*percent, message);
                }
            }
            InstallEvent::Status(status) => {
                for line in status.lines() {
                    output::verbose(line);
                }
            }
            InstallEvent::Finished(_) => {
                if let Some(bar) = self.bar.take() {
                    bar.finish();
                }
            }
        }
    }
}
