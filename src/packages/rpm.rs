use crate::constants::{INSTALL_TIMEOUT_SECS, QUERY_TIMEOUT_SECS, UNINSTALL_TIMEOUT_SECS};
use crate::core::types::PackageFormat;
use crate::error::{Result, SnapwizError};
use crate::exec::{CommandSpec, ToolTable};
use crate::packages::traits::{InstallPlan, InstalledPackage, PackageBackend, path_arg};
use std::path::Path;

pub struct RpmBackend;

impl PackageBackend for RpmBackend {
    fn format(&self) -> PackageFormat {
        PackageFormat::Rpm
    }

    fn install_tools(&self) -> &'static [&'static str] {
        &["dnf", "yum", "zypper", "rpm"]
    }

    fn install_plan(&self, tools: &ToolTable, path: &Path) -> Result<InstallPlan> {
        let Some(tool) = tools.first() else {
            return Err(SnapwizError::ToolNotFound(
                "No suitable package manager found for .rpm files".to_string(),
            ));
        };

        let path = path_arg(path);
        // dnf, yum and zypper share the same install syntax; bare rpm is the last resort
        let args = match tool {
            "rpm" => vec!["-ivh", path.as_str()],
            _ => vec!["install", "-y", path.as_str()],
        };

        Ok(InstallPlan::single(
            CommandSpec::new(tool, args)
                .privileged()
                .timeout_secs(INSTALL_TIMEOUT_SECS),
        ))
    }

    fn uninstall_command(&self, name: &str) -> Option<CommandSpec> {
        Some(
            CommandSpec::new("dnf", ["remove", "-y", name])
                .privileged()
                .timeout_secs(UNINSTALL_TIMEOUT_SECS),
        )
    }

    fn list_command(&self) -> Option<CommandSpec> {
        Some(CommandSpec::new("rpm", ["-qa"]).timeout_secs(QUERY_TIMEOUT_SECS))
    }

    fn parse_installed(&self, stdout: &str) -> Vec<InstalledPackage> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| InstalledPackage {
                name: line.to_string(),
                format: PackageFormat::Rpm,
            })
            .collect()
    }

    fn metadata_command(&self, path: &Path) -> Option<CommandSpec> {
        Some(
            CommandSpec::new("rpm", ["-qip".to_string(), path_arg(path)])
                .timeout_secs(QUERY_TIMEOUT_SECS),
        )
    }

    fn metadata_fields(&self) -> &'static [&'static str] {
        &["Name", "Version", "Release", "Architecture", "Summary", "Description"]
    }
}
