use crate::error::{Result, SnapwizError};
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Execute a command with timeout (non-interactive, output captured).
///
/// Once `timeout` elapses the child is killed and a [`SnapwizError::Timeout`]
/// is returned right away. The pipe readers are abandoned rather than joined:
/// descendants of the child may still hold the pipes open.
pub fn run_command_with_timeout(
    cmd: &mut Command,
    label: &str,
    timeout: Duration,
) -> Result<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| SnapwizError::CommandFailed {
        command: label.to_string(),
        reason: e.to_string(),
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| SnapwizError::CommandFailed {
            command: label.to_string(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| SnapwizError::CommandFailed {
            command: label.to_string(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    // Drain both pipes so a chatty tool cannot block on a full buffer
    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    // A privileged child may outlive the signal; reap it off-thread
                    thread::spawn(move || {
                        let _ = child.wait();
                    });
                    // Readers finish on their own once the last pipe holder exits
                    drop(stdout_thread);
                    drop(stderr_thread);
                    return Err(SnapwizError::Timeout {
                        command: label.to_string(),
                        seconds: timeout.as_secs(),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(SnapwizError::CommandFailed {
                    command: label.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
