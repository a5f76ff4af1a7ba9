//! # Default OS spawner: real child processes over stdio IPC.
//!
//! [`OsSpawner`] launches each worker with [`tokio::process::Command`]:
//!
//! - the derived [`RuntimeConfig`] is serialized as JSON into the child's
//!   `WORKER_CONFIG` environment variable;
//! - outbound messages are written to the child's stdin, one JSON value per
//!   line;
//! - the child's stdout is read line by line; every line that parses as
//!   JSON becomes a [`ProcessEvent::Message`];
//! - a waiter task reports exactly one [`ProcessEvent::Exit`] with the exit
//!   code (`128 + signo` for signal deaths) and the raw signal.
//!
//! ## Rules
//! - Writer, reader, and waiter run as independent tasks; none of them ever
//!   blocks the supervisor's control loop.
//! - A worker that closes stdout early still gets its `Exit` from the
//!   waiter; the reader simply ends.
//! - Non-JSON stdout lines are ignored (workers may print diagnostics).

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::config::RuntimeConfig;
use crate::error::SpawnError;
use crate::workers::WorkerSettings;

use super::handle::{ProcessEvent, ProcessHandle, Spawn};

/// Environment variable carrying the JSON runtime config to the child.
pub const WORKER_CONFIG_ENV: &str = "WORKER_CONFIG";

/// Spawner backed by real OS processes with line-delimited JSON over stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsSpawner;

impl OsSpawner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Spawn for OsSpawner {
    async fn spawn(
        &self,
        settings: &WorkerSettings,
        config: &RuntimeConfig,
        events: mpsc::UnboundedSender<ProcessEvent>,
    ) -> Result<ProcessHandle, SpawnError> {
        let config_json =
            serde_json::to_string(config).unwrap_or_else(|_| String::from("{}"));

        let mut child = Command::new(&settings.exec)
            .env(WORKER_CONFIG_ENV, config_json)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .kill_on_drop(false)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or(SpawnError::MissingStdio { stream: "stdin" })?;
        let stdout = child
            .stdout
            .take()
            .ok_or(SpawnError::MissingStdio { stream: "stdout" })?;

        let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Value>();
        let handle = ProcessHandle::new(child.id(), msg_tx);
        let id = handle.id();

        // Writer: drain outbound messages into the child's stdin.
        tokio::spawn(async move {
            while let Some(msg) = msg_rx.recv().await {
                let mut line = msg.to_string();
                line.push('\n');
                if stdin.write_all(line.as_bytes()).await.is_err() {
                    break;
                }
            }
        });

        // Reader: every JSON line from the child becomes a Message event.
        let reader_events = events.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if let Ok(payload) = serde_json::from_str::<Value>(&line) {
                    if reader_events
                        .send(ProcessEvent::Message { from: id, payload })
                        .is_err()
                    {
                        break;
                    }
                }
            }
        });

        // Waiter: exactly one Exit event per child.
        tokio::spawn(async move {
            let status = child.wait().await;
            let (code, signal) = exit_parts(status);
            let _ = events.send(ProcessEvent::Exit {
                handle: id,
                code,
                signal,
            });
        });

        Ok(handle)
    }
}

/// Maps a wait result to `(exit_code, signal)`.
///
/// Signal deaths use the conventional `128 + signo` code so per-exit-code
/// rules can address them (e.g. `137` for SIGKILL).
fn exit_parts(status: std::io::Result<std::process::ExitStatus>) -> (i32, Option<i32>) {
    match status {
        Ok(st) => {
            let signal = term_signal(&st);
            let code = st.code().unwrap_or_else(|| 128 + signal.unwrap_or(0));
            (code, signal)
        }
        // wait() itself failed; report a generic failure code.
        Err(_) => (-1, None),
    }
}

#[cfg(unix)]
fn term_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn term_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::workers::Transport;
    use std::path::PathBuf;
    use std::time::Duration;

    fn settings(exec: &str) -> WorkerSettings {
        WorkerSettings {
            slot: 1,
            exec: PathBuf::from(exec),
            transport: Transport::default(),
            send_slot: false,
            start_message: None,
        }
    }

    fn runtime_config(settings: &WorkerSettings) -> RuntimeConfig {
        RuntimeConfig::for_slot(&crate::RuntimeDefaults::default(), settings, 1)
    }

    #[tokio::test]
    async fn spawn_reports_exit_of_short_lived_child() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let s = settings("/bin/true");
        let handle = OsSpawner::new()
            .spawn(&s, &runtime_config(&s), tx)
            .await
            .unwrap();
        assert!(handle.pid().is_some());

        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("exit event in time")
            .expect("channel open");
        match ev {
            ProcessEvent::Exit { handle: id, code, .. } => {
                assert_eq!(id, handle.id());
                assert_eq!(code, 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn spawn_of_missing_executable_fails() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let s = settings("/nonexistent/worker-binary");
        let err = OsSpawner::new()
            .spawn(&s, &runtime_config(&s), tx)
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "spawn_io");
    }
}
