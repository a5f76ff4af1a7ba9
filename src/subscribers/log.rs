//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [spawned] slot=1 pid=4242
//! [exited] slot=1 pid=4242 code=137 signal=9
//! [restart-scheduled] slot=1 code=1 delay_ms=500
//! [restart-suppressed] slot=1 code=137
//! [policy-gap] slot=1 code=3 reason="no restart rule for exit code 3 and no fallback defined"
//! [pool] ready=true
//! ```
//!
//! Not intended for production use - implement a custom [`Subscribe`] for
//! structured logging or metrics collection.

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::subscribe::Subscribe;

/// Simple stdout logging subscriber.
#[derive(Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WorkerSpawned => {
                println!("[spawned] slot={:?} pid={:?}", e.slot, e.pid);
            }
            EventKind::WorkerExited => {
                println!(
                    "[exited] slot={:?} pid={:?} code={:?} signal={:?}",
                    e.slot, e.pid, e.exit_code, e.signal
                );
            }
            EventKind::SpawnFailed => {
                println!("[spawn-failed] slot={:?} reason={:?}", e.slot, e.reason);
            }
            EventKind::RestartScheduled => {
                println!(
                    "[restart-scheduled] slot={:?} code={:?} delay_ms={:?}",
                    e.slot, e.exit_code, e.delay_ms
                );
            }
            EventKind::RestartSuppressed => {
                println!(
                    "[restart-suppressed] slot={:?} code={:?}",
                    e.slot, e.exit_code
                );
            }
            EventKind::PolicyGap => {
                println!(
                    "[policy-gap] slot={:?} code={:?} reason={:?}",
                    e.slot, e.exit_code, e.reason
                );
            }
            EventKind::PoolStateChanged => {
                println!("[pool] ready={:?}", e.ready);
            }
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
                println!("[subscriber] reason={:?}", e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
