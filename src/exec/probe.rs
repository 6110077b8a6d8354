use std::collections::HashSet;

/// Answers "is this tool installed?"
pub trait ToolProbe: Send + Sync {
    fn has(&self, tool: &str) -> bool;
}

/// Looks tools up on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichProbe;

impl ToolProbe for WhichProbe {
    fn has(&self, tool: &str) -> bool {
        which::which(tool).is_ok()
    }
}

/// Fixed answer set, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    tools: HashSet<String>,
}

impl StaticProbe {
    pub fn new<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tools: tools.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToolProbe for StaticProbe {
    fn has(&self, tool: &str) -> bool {
        self.tools.contains(tool)
    }
}

/// Ranked candidate list resolved against a probe once per operation.
///
/// Keeps candidate order, so `available()` is already in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolTable {
    available: Vec<String>,
}

impl ToolTable {
    pub fn resolve(probe: &dyn ToolProbe, candidates: &[&str]) -> Self {
        let available = candidates
            .iter()
            .filter(|tool| probe.has(tool))
            .map(|tool| tool.to_string())
            .collect();
        Self { available }
    }

    pub fn has(&self, tool: &str) -> bool {
        self.available.iter().any(|t| t == tool)
    }

    pub fn first(&self) -> Option<&str> {
        self.available.first().map(String::as_str)
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keeps_candidate_priority() {
        let probe = StaticProbe::new(["zypper", "yum"]);
        let table = ToolTable::resolve(&probe, &["dnf", "yum", "zypper", "rpm"]);
        assert_eq!(table.first(), Some("yum"));
        assert_eq!(table.available(), &["yum".to_string(), "zypper".to_string()]);
        assert!(!table.has("dnf"));
    }

    #[test]
    fn empty_probe_resolves_nothing() {
        let table = ToolTable::resolve(&StaticProbe::default(), &["apt", "dpkg"]);
        assert_eq!(table.first(), None);
    }

    #[cfg(unix)]
    #[test]
    fn which_probe_finds_shell() {
        assert!(WhichProbe.has("sh"));
        assert!(!WhichProbe.has("snapwiz-definitely-missing-binary"));
    }
}
