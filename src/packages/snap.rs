use crate::constants::INSTALL_TIMEOUT_SECS;
use crate::core::types::PackageFormat;
use crate::error::{Result, SnapwizError};
use crate::exec::{CommandSpec, ToolTable};
use crate::packages::traits::{InstallPlan, PackageBackend, path_arg};
use std::path::Path;

pub struct SnapBackend;

impl PackageBackend for SnapBackend {
    fn format(&self) -> PackageFormat {
        PackageFormat::Snap
    }

    fn install_tools(&self) -> &'static [&'static str] {
        &["snap"]
    }

    fn install_plan(&self, tools: &ToolTable, path: &Path) -> Result<InstallPlan> {
        if !tools.has("snap") {
            return Err(SnapwizError::ToolNotFound(
                "snapd is required to install .snap files".to_string(),
            ));
        }

        // Local .snap files are unsigned from snapd's point of view
        Ok(InstallPlan::single(
            CommandSpec::new(
                "snap",
                ["install".to_string(), "--dangerous".to_string(), path_arg(path)],
            )
            .privileged()
            .timeout_secs(INSTALL_TIMEOUT_SECS),
        ))
    }
}
