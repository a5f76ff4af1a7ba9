//! Minimal pool: three `cat` workers that stay alive reading stdin.
//!
//! Run with: `cargo run --example basic_pool`
//!
//! The pool fills, the debounced ready flag flips to true, and the
//! supervisor keeps running until the shutdown token is cancelled (here:
//! after ten seconds). Kill one of the `cat` processes from another
//! terminal to watch the immediate degrade + restart + re-debounce cycle
//! in the log output.

use std::sync::Arc;
use std::time::Duration;

use forkvisor::{LogWriter, PoolConfig, PoolDecl, Subscribe, SupervisorBuilder, WorkerKind};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = PoolConfig::default();
    cfg.debounce = Duration::from_millis(500);

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = SupervisorBuilder::new(cfg).with_subscribers(subs).build();

    let mut ready = sup.readiness();
    tokio::spawn(async move {
        while ready.changed().await.is_ok() {
            println!("=== pool ready: {} ===", *ready.borrow());
        }
    });

    let stop = sup.shutdown_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        stop.cancel();
    });

    let decl = PoolDecl::new(vec![WorkerKind::new("/bin/cat").count(3)]);
    sup.run(decl, None).await?;
    Ok(())
}
