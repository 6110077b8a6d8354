//! External process capability
//!
//! Every package-manager call goes through [`CommandRunner`]: run a program
//! (optionally behind a privilege-escalation prefix), capture its output and
//! enforce a timeout. Tool presence goes through [`ToolProbe`] so callers can
//! swap in a fixed capability table instead of touching real binaries.

mod command_exec;
mod probe;

pub use command_exec::run_command_with_timeout;
pub use probe::{StaticProbe, ToolProbe, ToolTable, WhichProbe};

use crate::error::Result;
use crate::project_identity;
use std::fmt;
use std::process::Command;
use std::time::Duration;

/// Default escalation agent used for mutating package-manager calls
pub const DEFAULT_ESCALATION: &str = "pkexec";

/// A single external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub privileged: bool,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            privileged: false,
            timeout: Duration::from_secs(crate::constants::QUERY_TIMEOUT_SECS),
        }
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.as_str());
        parts.extend(self.args.iter().map(String::as_str));
        match shlex::try_join(parts.iter().copied()) {
            Ok(joined) => f.write_str(&joined),
            Err(_) => f.write_str(&parts.join(" ")),
        }
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Diagnostic text for a failed run: stderr when present, else stdout.
    pub fn diagnostics(&self) -> &str {
        if self.stderr.trim().is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Run a command, capture output, enforce its timeout.
///
/// Implementations return `Err` only when the process could not be run to
/// completion (spawn failure, timeout); a non-zero exit is a normal
/// `CommandOutput` with `success == false`.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs real processes, prefixing privileged calls with an escalation agent.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    escalation: Vec<String>,
}

impl SystemRunner {
    pub fn new(escalation: Vec<String>) -> Self {
        Self { escalation }
    }

    /// Escalation prefix from `SNAPWIZ_ESCALATION` (shell-word split), else `pkexec`.
    ///
    /// An empty value disables escalation entirely.
    pub fn from_env() -> Self {
        let escalation = match std::env::var(project_identity::env_key("ESCALATION")) {
            Ok(value) => shlex::split(&value).unwrap_or_default(),
            Err(_) => vec![DEFAULT_ESCALATION.to_string()],
        };
        Self::new(escalation)
    }

    pub fn escalation(&self) -> &[String] {
        &self.escalation
    }

    pub(crate) fn build_command(&self, spec: &CommandSpec) -> Command {
        match self.escalation.split_first() {
            Some((agent, agent_args)) if spec.privileged => {
                let mut cmd = Command::new(agent);
                cmd.args(agent_args).arg(&spec.program).args(&spec.args);
                cmd
            }
            _ => {
                let mut cmd = Command::new(&spec.program);
                cmd.args(&spec.args);
                cmd
            }
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let mut cmd = self.build_command(spec);
        let output = run_command_with_timeout(&mut cmd, &spec.to_string(), spec.timeout)?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// True when the current process runs as root.
#[cfg(unix)]
pub fn is_root() -> bool {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata("/proc/self")
        .map(|meta| meta.uid() == 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// Whether mutating package operations can be attempted at all.
pub fn has_install_privileges(probe: &dyn ToolProbe) -> bool {
    is_root() || probe.has("pkexec") || probe.has("sudo")
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileged_commands_get_agent_prefix() {
        let runner = SystemRunner::new(vec!["sudo".into(), "-n".into()]);
        let spec = CommandSpec::new("apt", ["install", "-y", "/tmp/a.deb"]).privileged();
        let debug = format!("{:?}", runner.build_command(&spec));
        assert!(debug.starts_with("\"sudo\" \"-n\" \"apt\""), "{debug}");
    }

    #[test]
    fn unprivileged_commands_run_directly() {
        let runner = SystemRunner::new(vec!["pkexec".into()]);
        let spec = CommandSpec::new("rpm", ["-qa"]);
        let debug = format!("{:?}", runner.build_command(&spec));
        assert!(!debug.contains("pkexec"));
    }

    #[test]
    fn empty_escalation_runs_directly() {
        let runner = SystemRunner::new(Vec::new());
        let spec = CommandSpec::new("dnf", ["install", "-y", "x.rpm"]).privileged();
        let debug = format!("{:?}", runner.build_command(&spec));
        assert!(debug.starts_with("\"dnf\""));
    }

    #[test]
    fn spec_display_quotes_arguments() {
        let spec = CommandSpec::new("apt", ["install", "/tmp/my pkg.deb"]);
        assert_eq!(spec.to_string(), "apt install '/tmp/my pkg.deb'");
    }

    #[test]
    fn diagnostics_prefer_stderr() {
        let out = CommandOutput {
            success: false,
            code: Some(1),
            stdout: "partial".into(),
            stderr: "E: broken".into(),
        };
        assert_eq!(out.diagnostics(), "E: broken");

        let quiet = CommandOutput {
            stderr: "  ".into(),
            ..out
        };
        assert_eq!(quiet.diagnostics(), "partial");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output() {
        let runner = SystemRunner::new(Vec::new());
        let spec = CommandSpec::new("sh", ["-c", "echo out; echo err >&2; exit 3"]);
        let out = runner.run(&spec).expect("run");
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }
}
