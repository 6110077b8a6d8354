//! Detect Command
//!
//! Reports the system package manager, privilege escalation and which
//! package formats can be installed on this machine.

use crate::error::Result;
use crate::exec::{ToolTable, has_install_privileges, is_root};
use crate::packages::{all_backends, detect_package_manager};
use crate::traits::AppContext;
use crate::ui as output;
use colored::Colorize;

pub fn run(ctx: &AppContext) -> Result<()> {
    let probe = ctx.probe.as_ref();

    output::header("System");
    output::keyval(
        "Package manager",
        detect_package_manager(probe)
            .as_deref()
            .unwrap_or("none found"),
    );

    let privileges = if is_root() {
        "running as root".to_string()
    } else if has_install_privileges(probe) {
        "pkexec/sudo available".to_string()
    } else {
        "none (installs will fail)".to_string()
    };
    output::keyval("Privileges", &privileges);

    output::header("Supported formats");
    for backend in all_backends() {
        let tools = ToolTable::resolve(probe, backend.install_tools());
        let status = match tools.first() {
            Some(tool) => format!("{} {}", "✓".green(), tool),
            None => format!(
                "{} needs one of: {}",
                "✗".red(),
                backend.install_tools().join(", ")
            ),
        };
        println!("  {:<28} {}", backend.format().display_name(), status);
    }
    Ok(())
}
