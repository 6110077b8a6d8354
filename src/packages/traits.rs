use crate::core::types::PackageFormat;
use crate::error::Result;
use crate::exec::{CommandSpec, ToolTable};
use std::path::Path;

/// Commands needed to install one package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// The invocation whose exit status decides success
    pub command: CommandSpec,
    /// Best-effort follow-up run only when `command` fails
    pub repair: Option<CommandSpec>,
}

impl InstallPlan {
    pub fn single(command: CommandSpec) -> Self {
        Self {
            command,
            repair: None,
        }
    }
}

/// One installed package reported by the system database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub format: PackageFormat,
}

/// Per-format knowledge of the OS tooling.
pub trait PackageBackend: Send + Sync {
    fn format(&self) -> PackageFormat;

    /// Install tools this backend can use, highest priority first.
    fn install_tools(&self) -> &'static [&'static str];

    /// Pick the command for `path` from the tools that are actually present.
    fn install_plan(&self, tools: &ToolTable, path: &Path) -> Result<InstallPlan>;

    /// Removal command for an installed package name.
    /// Default: removal not supported for this format.
    fn uninstall_command(&self, _name: &str) -> Option<CommandSpec> {
        None
    }

    /// Query listing every installed package of this format.
    /// Default: no listing support.
    fn list_command(&self) -> Option<CommandSpec> {
        None
    }

    /// Parse the output of [`Self::list_command`].
    fn parse_installed(&self, _stdout: &str) -> Vec<InstalledPackage> {
        Vec::new()
    }

    /// Query printing package header metadata.
    /// Default: no metadata tool for this format.
    fn metadata_command(&self, _path: &Path) -> Option<CommandSpec> {
        None
    }

    /// Header fields worth showing from [`Self::metadata_command`] output.
    fn metadata_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
