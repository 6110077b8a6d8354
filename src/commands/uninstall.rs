//! Uninstall Command

use super::install::failure_text;
use crate::core::types::{InstallResult, PackageFormat};
use crate::error::{Result, SnapwizError};
use crate::traits::AppContext;
use crate::ui as output;
use crate::uninstall::uninstall_all;

pub struct UninstallOptions {
    pub names: Vec<String>,
    pub format: PackageFormat,
    pub yes: bool,
}

pub fn run(ctx: &AppContext, options: UninstallOptions) -> Result<()> {
    output::header(&format!("Uninstalling {} package(s)", options.names.len()));
    for name in &options.names {
        output::indent(&format!("• {}", name), 1);
    }

    if !options.yes {
        if !output::is_interactive() {
            return Err(SnapwizError::Other(
                "Refusing to uninstall without confirmation; pass --yes".to_string(),
            ));
        }
        if !output::prompt_yes_no("Remove these packages?") {
            output::info("Uninstall cancelled");
            return Ok(());
        }
    }

    let results = uninstall_all(
        &options.names,
        options.format,
        ctx.runner.as_ref(),
        ctx.history.as_ref(),
    );

    let mut failed = 0;
    for (name, result) in &results {
        match result {
            InstallResult::Success(message) => output::success(&format!("{}: {}", name, message)),
            InstallResult::Failure { category, message } => {
                failed += 1;
                output::error(&format!("{}: {}", name, failure_text(*category, message)));
            }
        }
    }

    if failed > 0 {
        return Err(SnapwizError::Other(format!(
            "{} of {} packages could not be removed",
            failed,
            results.len()
        )));
    }
    Ok(())
}
