use crate::constants::{INSTALL_TIMEOUT_SECS, QUERY_TIMEOUT_SECS, UNINSTALL_TIMEOUT_SECS};
use crate::core::types::PackageFormat;
use crate::error::{Result, SnapwizError};
use crate::exec::{CommandSpec, ToolTable};
use crate::packages::traits::{InstallPlan, InstalledPackage, PackageBackend, path_arg};
use std::path::Path;

pub struct DebBackend;

impl PackageBackend for DebBackend {
    fn format(&self) -> PackageFormat {
        PackageFormat::Deb
    }

    fn install_tools(&self) -> &'static [&'static str] {
        &["apt", "dpkg"]
    }

    fn install_plan(&self, tools: &ToolTable, path: &Path) -> Result<InstallPlan> {
        let path = path_arg(path);

        // apt resolves dependencies itself
        if tools.has("apt") {
            return Ok(InstallPlan::single(
                CommandSpec::new("apt", ["install", "-y", path.as_str()])
                    .privileged()
                    .timeout_secs(INSTALL_TIMEOUT_SECS),
            ));
        }

        if tools.has("dpkg") {
            return Ok(InstallPlan {
                command: CommandSpec::new("dpkg", ["-i", path.as_str()])
                    .privileged()
                    .timeout_secs(INSTALL_TIMEOUT_SECS),
                repair: Some(
                    CommandSpec::new("apt-get", ["install", "-f", "-y"])
                        .privileged()
                        .timeout_secs(INSTALL_TIMEOUT_SECS),
                ),
            });
        }

        Err(SnapwizError::ToolNotFound(
            "No suitable package manager found for .deb files".to_string(),
        ))
    }

    fn uninstall_command(&self, name: &str) -> Option<CommandSpec> {
        Some(
            CommandSpec::new("apt", ["remove", "-y", name])
                .privileged()
                .timeout_secs(UNINSTALL_TIMEOUT_SECS),
        )
    }

    fn list_command(&self) -> Option<CommandSpec> {
        Some(CommandSpec::new("dpkg", ["--get-selections"]).timeout_secs(QUERY_TIMEOUT_SECS))
    }

    fn parse_installed(&self, stdout: &str) -> Vec<InstalledPackage> {
        // Lines look like "bash\t\t\t\t\tinstall"
        stdout
            .lines()
            .filter_map(|line| {
                let mut parts = line.split('\t').filter(|p| !p.is_empty());
                let name = parts.next()?.trim();
                let status = parts.next().unwrap_or_default();
                if name.is_empty() || !status.to_lowercase().contains("install") {
                    return None;
                }
                Some(InstalledPackage {
                    name: name.to_string(),
                    format: PackageFormat::Deb,
                })
            })
            .collect()
    }

    fn metadata_command(&self, path: &Path) -> Option<CommandSpec> {
        Some(
            CommandSpec::new("dpkg-deb", ["-I".to_string(), path_arg(path)])
                .timeout_secs(QUERY_TIMEOUT_SECS),
        )
    }

    fn metadata_fields(&self) -> &'static [&'static str] {
        &["Package", "Version", "Architecture", "Maintainer", "Description"]
    }
}
