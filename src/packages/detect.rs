use crate::exec::{ToolProbe, ToolTable};

/// System package managers in detection priority order
pub const SYSTEM_MANAGERS: &[&str] = &["apt", "apt-get", "dnf", "yum", "zypper"];

/// Name of the highest-priority system package manager present, if any.
///
/// Informational only: installs re-probe the tools for their own format.
pub fn detect_package_manager(probe: &dyn ToolProbe) -> Option<String> {
    ToolTable::resolve(probe, SYSTEM_MANAGERS)
        .first()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::StaticProbe;

    #[test]
    fn apt_wins_over_rpm_tools() {
        let probe = StaticProbe::new(["dnf", "apt"]);
        assert_eq!(detect_package_manager(&probe).as_deref(), Some("apt"));
    }

    #[test]
    fn falls_back_through_priority_list() {
        let probe = StaticProbe::new(["zypper"]);
        assert_eq!(detect_package_manager(&probe).as_deref(), Some("zypper"));
        assert_eq!(detect_package_manager(&StaticProbe::default()), None);
    }
}
