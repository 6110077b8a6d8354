use snapwiz::batch::{BatchOrchestrator, BatchState, NoopObserver};
use snapwiz::core::queue::InstallQueue;
use snapwiz::error::Result;
use snapwiz::exec::{CommandOutput, CommandRunner, CommandSpec, StaticProbe};
use snapwiz::history::{HistoryFilter, HistoryStore, StatusFilter};
use snapwiz::traits::HistoryLog;
use snapwiz::verify::VerificationRequest;
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Pretends to be apt: anything with "broken" in its arguments fails.
#[derive(Default)]
struct FakeApt {
    seen: Mutex<Vec<String>>,
}

impl CommandRunner for FakeApt {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let line = spec.to_string();
        self.seen.lock().unwrap().push(line.clone());
        let broken = line.contains("broken");
        Ok(CommandOutput {
            success: !broken,
            code: Some(if broken { 100 } else { 0 }),
            stdout: if broken { String::new() } else { "Setting up ...".to_string() },
            stderr: if broken {
                "E: Unmet dependencies".to_string()
            } else {
                String::new()
            },
        })
    }
}

#[test]
fn batch_run_lands_in_the_history_file() {
    let dir = TempDir::new().unwrap();
    let files: Vec<_> = ["one_1.0_all.deb", "broken_1.0_all.deb", "three_1.0_all.deb"]
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            fs::write(&path, b"!<arch>\n").unwrap();
            path
        })
        .collect();

    let mut queue = InstallQueue::new();
    for file in &files {
        assert!(queue.enqueue_path(file).unwrap());
    }

    let runner = Arc::new(FakeApt::default());
    let store = Arc::new(HistoryStore::new(dir.path().join("history.json")));
    let history: Arc<dyn HistoryLog> = store.clone();
    let orchestrator =
        BatchOrchestrator::new(runner.clone(), Arc::new(StaticProbe::new(["apt"])), history);

    let mut state = BatchState::new(queue);
    let report =
        orchestrator.run_batch(&mut state, &VerificationRequest::none(), &mut NoopObserver);

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.cancelled);
    assert!(state.queue.is_empty());

    let entries = store.get_all();
    let names: Vec<_> = entries.iter().map(|e| e.package_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["one_1.0_all.deb", "broken_1.0_all.deb", "three_1.0_all.deb"]
    );

    let failed = store.filter(&HistoryFilter {
        status: Some(StatusFilter::Failed),
        ..Default::default()
    });
    assert_eq!(failed.len(), 1);
    assert!(failed[0].message.contains("E: Unmet dependencies"));

    let stats = store.stats();
    assert_eq!((stats.total, stats.successful, stats.failed), (3, 2, 1));

    assert!(
        runner
            .seen
            .lock()
            .unwrap()
            .iter()
            .any(|line| line.starts_with("apt install -y"))
    );
}
