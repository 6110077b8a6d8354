use super::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::{Result, SnapwizError};
use std::sync::Mutex;

type Responder = Box<dyn Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync>;

/// Runner that records every call and answers from a closure.
pub(crate) struct ScriptedRunner {
    responder: Responder,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&CommandSpec) -> Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command exits 0 with `stdout`.
    pub(crate) fn succeeding(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::new(move |_| Ok(ok(&stdout)))
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().expect("calls lock").push(spec.clone());
        (self.responder)(spec)
    }
}

pub(crate) fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub(crate) fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

pub(crate) fn timed_out(spec: &CommandSpec) -> SnapwizError {
    SnapwizError::Timeout {
        command: spec.to_string(),
        seconds: spec.timeout.as_secs(),
    }
}
