use crate::core::types::PackageFormat;
use crate::exec::CommandRunner;
use crate::packages::registry::all_backends;
use crate::packages::traits::InstalledPackage;
use crate::ui;

/// Enumerate installed packages from every format that has a listing tool.
///
/// Best effort: a missing tool, a timeout or a non-zero exit just contributes
/// nothing for that format.
pub fn list_installed(runner: &dyn CommandRunner) -> Vec<InstalledPackage> {
    let mut packages = Vec::new();

    for backend in all_backends() {
        let Some(spec) = backend.list_command() else {
            continue;
        };

        match runner.run(&spec) {
            Ok(output) if output.success => {
                packages.extend(backend.parse_installed(&output.stdout));
            }
            Ok(output) => {
                ui::verbose(&format!(
                    "'{}' exited with {:?}, skipping {} packages",
                    spec,
                    output.code,
                    backend.format()
                ));
            }
            Err(e) => {
                ui::verbose(&format!("Skipping {} packages: {}", backend.format(), e));
            }
        }
    }

    packages
}

/// Narrow a listing by format and case-insensitive name substring.
pub fn filter_installed<'a>(
    packages: &'a [InstalledPackage],
    format: Option<PackageFormat>,
    query: Option<&str>,
) -> Vec<&'a InstalledPackage> {
    let query = query.map(str::to_lowercase).filter(|q| !q.is_empty());

    packages
        .iter()
        .filter(|pkg| format.is_none_or(|f| pkg.format == f))
        .filter(|pkg| {
            query
                .as_deref()
                .is_none_or(|q| pkg.name.to_lowercase().contains(q))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::{ScriptedRunner, failed, ok};

    const SELECTIONS: &str =
        "bash\t\t\t\t\tinstall\nlibfoo\t\t\t\t\tdeinstall\nvim\t\t\t\t\thold\n";

    #[test]
    fn merges_dpkg_and_rpm_listings() {
        let runner = ScriptedRunner::new(|spec| match spec.program.as_str() {
            "dpkg" => Ok(ok(SELECTIONS)),
            "rpm" => Ok(ok("kernel-6.1-1.x86_64\n\nbash-5.2-1.x86_64\n")),
            other => panic!("unexpected tool {other}"),
        });

        let packages = list_installed(&runner);
        let names: Vec<_> = packages.iter().map(|p| p.name.as_str()).collect();
        // "deinstall" contains "install" and is kept, "hold" is dropped
        assert_eq!(
            names,
            vec!["bash", "libfoo", "kernel-6.1-1.x86_64", "bash-5.2-1.x86_64"]
        );
        assert_eq!(packages[0].format, PackageFormat::Deb);
        assert_eq!(packages[2].format, PackageFormat::Rpm);
    }

    #[test]
    fn missing_tools_are_tolerated() {
        let runner = ScriptedRunner::new(|spec| match spec.program.as_str() {
            "dpkg" => Err(crate::error::SnapwizError::CommandFailed {
                command: spec.to_string(),
                reason: "No such file or directory".into(),
            }),
            _ => Ok(failed("rpmdb open failed")),
        });
        assert!(list_installed(&runner).is_empty());
    }

    #[test]
    fn filter_by_format_and_query() {
        let packages = vec![
            InstalledPackage {
                name: "Firefox".into(),
                format: PackageFormat::Deb,
            },
            InstalledPackage {
                name: "firefox-esr".into(),
                format: PackageFormat::Rpm,
            },
            InstalledPackage {
                name: "bash".into(),
                format: PackageFormat::Deb,
            },
        ];

        let hits = filter_installed(&packages, Some(PackageFormat::Deb), Some("fire"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Firefox");

        assert_eq!(filter_installed(&packages, None, Some("")).len(), 3);
        assert_eq!(filter_installed(&packages, None, Some("FIRE")).len(), 2);
    }
}
