use crate::core::types::PackageFormat;
use crate::error::Result;
use crate::packages::{filter_installed, list_installed};
use crate::traits::AppContext;
use crate::ui as output;

pub struct InstalledOptions {
    pub format: Option<PackageFormat>,
    pub search: Option<String>,
}

pub fn run(ctx: &AppContext, options: InstalledOptions) -> Result<()> {
    let packages = list_installed(ctx.runner.as_ref());
    let matches = filter_installed(&packages, options.format, options.search.as_deref());

    if matches.is_empty() {
        output::info("No installed packages matched");
        return Ok(());
    }

    output::header(&format!("Installed packages ({})", matches.len()));
    for package in matches {
        println!("{:<8} {}", package.format.to_string(), package.name);
    }
    Ok(())
}
