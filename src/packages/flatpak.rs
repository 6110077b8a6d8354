use crate::constants::INSTALL_TIMEOUT_SECS;
use crate::core::types::PackageFormat;
use crate::error::{Result, SnapwizError};
use crate::exec::{CommandSpec, ToolTable};
use crate::packages::traits::{InstallPlan, PackageBackend, path_arg};
use std::path::Path;

pub struct FlatpakBackend;

impl PackageBackend for FlatpakBackend {
    fn format(&self) -> PackageFormat {
        PackageFormat::Flatpak
    }

    fn install_tools(&self) -> &'static [&'static str] {
        &["flatpak"]
    }

    fn install_plan(&self, tools: &ToolTable, path: &Path) -> Result<InstallPlan> {
        if !tools.has("flatpak") {
            return Err(SnapwizError::ToolNotFound(
                "flatpak is required to install .flatpak bundles".to_string(),
            ));
        }

        // Per-user install, no escalation needed
        Ok(InstallPlan::single(
            CommandSpec::new(
                "flatpak",
                [
                    "install".to_string(),
                    "-y".to_string(),
                    "--user".to_string(),
                    "--bundle".to_string(),
                    path_arg(path),
                ],
            )
            .timeout_secs(INSTALL_TIMEOUT_SECS),
        ))
    }
}
