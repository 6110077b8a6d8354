use super::stage::InstallStage;
use crate::core::types::InstallResult;
use std::sync::mpsc::Sender;

/// Notification emitted while an install runs.
///
/// For one install, `Step` events arrive in stage order with non-decreasing
/// percentages and `Finished` is always the last event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    Step {
        stage: InstallStage,
        percent: u8,
        message: String,
    },
    Status(String),
    Finished(InstallResult),
}

/// Sending half of the progress channel.
///
/// Sends never block and a dropped receiver is ignored: the install keeps
/// going whether or not anyone is listening.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<InstallEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<InstallEvent>) -> Self {
        Self { tx }
    }

    pub(super) fn enter(&self, stage: InstallStage) {
        self.step(stage, stage.percent(), stage.description());
    }

    pub(super) fn step(&self, stage: InstallStage, percent: u8, message: &str) {
        let _ = self.tx.send(InstallEvent::Step {
            stage,
            percent,
            message: message.to_string(),
        });
    }

    pub(super) fn status(&self, message: impl Into<String>) {
        let _ = self.tx.send(InstallEvent::Status(message.into()));
    }

    pub(super) fn finish(&self, result: InstallResult) {
        let _ = self.tx.send(InstallEvent::Finished(result));
    }
}
