//! # Supervisor: pool launch, message relay, exit handling, readiness.
//!
//! The [`Supervisor`] owns the event bus, a [`SubscriberSet`], the spawn
//! collaborator, and the pool configuration. [`Supervisor::run`] expands the
//! pool declaration, launches every slot, and then drives a single control
//! loop until the shutdown token fires.
//!
//! ## High-level architecture
//! ```text
//! PoolDecl ──expand──► [WorkerSettings; N]      expected = N
//!                            │
//!                            ▼  Spawn::spawn (one per slot)
//!                      ProcessHandle ──put──► ForkRegistry ──size──► ReadinessTracker
//!                                                                        │
//! Control loop (single task, owns all state):                            ▼
//!   tokio::select! {                                        watch<bool> + PoolStateChanged
//!     ProcessEvent::Message { from, payload } → relay to all others (sender excluded)
//!     ProcessEvent::Exit { handle, code, signal } →
//!         remove record → readiness recompute (immediate degrade)
//!         append error-log line
//!         RestartRule::decide_default(rules, code)
//!           ├─ Restart           → spawn_slot now
//!           ├─ DelayedRestart(d) → timer task → Tick::Restart after d
//!           ├─ NoRestart         → slot stays vacant
//!           └─ Err(gap)          → PolicyGap event, slot stays vacant
//!     Tick::ReadyTimer { epoch } → tracker.confirm (re-validates size)
//!     Tick::Restart { settings } → spawn_slot
//!     shutdown token            → break
//!   }
//! ```
//!
//! ## Rules
//! - All registry mutation and readiness recomputation happen inside the
//!   control loop, serialized in arrival order; nothing else touches them.
//! - Timers never mutate state directly; they post ticks back into the loop
//!   and the tick handler re-checks the condition the timer was armed for.
//! - Relay preserves per-sender arrival order (single loop); sends are
//!   best-effort and a closed peer never aborts the fan-out.
//! - Spawn failures are fatal during initial launch and downgraded to
//!   `SpawnFailed` events during restarts (retrying is the caller's policy).

use std::sync::Arc;

use serde_json::json;
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::config::{PoolConfig, RuntimeConfig};
use crate::error::{RuntimeError, SpawnError};
use crate::events::{Bus, Event, EventKind};
use crate::policies::{ExitRules, RestartRule};
use crate::process::{HandleId, ProcessEvent, Spawn};
use crate::subscribers::SubscriberSet;
use crate::workers::{PoolDecl, WorkerSettings};

use super::logsink::ErrorLog;
use super::readiness::{ReadinessStep, ReadinessTracker};
use super::registry::{ForkRegistry, LaunchRecord};

/// Timer completions posted back into the control loop.
enum Tick {
    /// Debounce window elapsed; `epoch` identifies the arm it belongs to.
    ReadyTimer { epoch: u64 },
    /// A delayed restart came due for this slot.
    Restart { settings: Arc<WorkerSettings> },
}

/// Mutable pool state, owned exclusively by the control loop.
struct PoolState {
    registry: ForkRegistry,
    tracker: ReadinessTracker,
    errlog: ErrorLog,
    rules: Option<ExitRules>,
    max_slots: u32,
    proc_tx: mpsc::UnboundedSender<ProcessEvent>,
    tick_tx: mpsc::UnboundedSender<Tick>,
}

/// Coordinates worker processes, message relay, and the readiness signal.
pub struct Supervisor {
    cfg: PoolConfig,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    spawner: Arc<dyn Spawn>,
    shutdown: CancellationToken,
    ready_tx: watch::Sender<bool>,
}

impl Supervisor {
    pub(crate) fn new_internal(
        cfg: PoolConfig,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        spawner: Arc<dyn Spawn>,
        shutdown: CancellationToken,
    ) -> Self {
        let (ready_tx, _ready_rx) = watch::channel(false);
        Self {
            cfg,
            bus,
            subs,
            spawner,
            shutdown,
            ready_tx,
        }
    }

    /// Returns a receiver observing runtime events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Returns a watch over the debounced readiness flag.
    ///
    /// The value changes exactly when a
    /// [`EventKind::PoolStateChanged`] event is published.
    pub fn readiness(&self) -> watch::Receiver<bool> {
        self.ready_tx.subscribe()
    }

    /// Returns the token that ends [`Supervisor::run`] when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Launches the declared pool and supervises it until shutdown.
    ///
    /// `rules` is the optional per-exit-code instruction map; without it
    /// every exit restarts the slot immediately.
    ///
    /// Returns early with [`RuntimeError::Spawn`] if any slot of the
    /// initial launch fails.
    pub async fn run(&self, decl: PoolDecl, rules: Option<ExitRules>) -> Result<(), RuntimeError> {
        self.subscriber_listener();

        let slots = decl.expand();
        let expected = slots.len();

        let (proc_tx, mut proc_rx) = mpsc::unbounded_channel::<ProcessEvent>();
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<Tick>();

        let mut st = PoolState {
            registry: ForkRegistry::new(),
            tracker: ReadinessTracker::new(expected, self.cfg.debounce),
            errlog: ErrorLog::new(self.cfg.error_log.clone()),
            rules,
            max_slots: expected as u32,
            proc_tx,
            tick_tx,
        };

        for settings in &slots {
            if let Err(source) = self.spawn_slot(&mut st, settings).await {
                return Err(RuntimeError::Spawn {
                    slot: settings.slot,
                    source,
                });
            }
        }
        if slots.is_empty() {
            // Nothing will ever mutate the registry; recompute once so an
            // empty pool still reaches its (vacuous) ready state.
            let step = st.tracker.on_size_change(0);
            self.apply_step(&st, step);
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                Some(ev) = proc_rx.recv() => match ev {
                    ProcessEvent::Message { from, payload } => self.relay(&st, from, payload),
                    ProcessEvent::Exit { handle, code, signal } => {
                        self.handle_exit(&mut st, handle, code, signal).await;
                    }
                },
                Some(tick) = tick_rx.recv() => match tick {
                    Tick::ReadyTimer { epoch } => {
                        let size = st.registry.size();
                        let step = st.tracker.confirm(epoch, size);
                        self.apply_step(&st, step);
                    }
                    Tick::Restart { settings } => {
                        if let Err(e) = self.spawn_slot(&mut st, &settings).await {
                            self.publish_spawn_failed(settings.slot, &e);
                        }
                    }
                },
            }
        }
        Ok(())
    }

    /// Spawns one worker for `settings`, registers it, and delivers its
    /// startup directives.
    async fn spawn_slot(
        &self,
        st: &mut PoolState,
        settings: &Arc<WorkerSettings>,
    ) -> Result<(), SpawnError> {
        let config = RuntimeConfig::for_slot(&self.cfg.runtime, settings, st.max_slots);
        let handle = self
            .spawner
            .spawn(settings, &config, st.proc_tx.clone())
            .await?;

        st.registry.put(LaunchRecord {
            handle: handle.clone(),
            settings: Arc::clone(settings),
        });
        let step = st.tracker.on_size_change(st.registry.size());
        self.apply_step(st, step);

        let mut ev = Event::new(EventKind::WorkerSpawned).with_slot(settings.slot);
        if let Some(pid) = handle.pid() {
            ev = ev.with_pid(pid);
        }
        self.bus.publish(ev);

        // Startup directives go out right after registration, on first
        // launch and on every restart alike.
        if settings.send_slot {
            handle.send(json!({ "slot": settings.slot }));
        }
        if let Some(msg) = &settings.start_message {
            handle.send(msg.clone());
        }
        Ok(())
    }

    /// Forwards a worker's message to every other registered worker.
    fn relay(&self, st: &PoolState, from: HandleId, payload: serde_json::Value) {
        for (id, record) in st.registry.iter() {
            if *id != from {
                record.handle.send(payload.clone());
            }
        }
    }

    /// Processes one exit notification: deregister, log, decide, relaunch.
    async fn handle_exit(
        &self,
        st: &mut PoolState,
        handle: HandleId,
        code: i32,
        signal: Option<i32>,
    ) {
        // Exits for handles we no longer (or never) track are a no-op.
        let Some(record) = st.registry.remove(handle) else {
            return;
        };
        let step = st.tracker.on_size_change(st.registry.size());
        self.apply_step(st, step);

        let slot = record.settings.slot;
        let mut ev = Event::new(EventKind::WorkerExited)
            .with_slot(slot)
            .with_exit_code(code);
        if let Some(pid) = record.handle.pid() {
            ev = ev.with_pid(pid);
        }
        if let Some(sig) = signal {
            ev = ev.with_signal(sig);
        }
        self.bus.publish(ev);

        st.errlog.append_exit(record.handle.pid(), code, signal).await;

        match RestartRule::decide_default(st.rules.as_ref(), code) {
            Ok(RestartRule::Restart) => {
                if let Err(e) = self.spawn_slot(st, &record.settings).await {
                    self.publish_spawn_failed(slot, &e);
                }
            }
            Ok(RestartRule::DelayedRestart(delay)) => {
                self.bus.publish(
                    Event::new(EventKind::RestartScheduled)
                        .with_slot(slot)
                        .with_exit_code(code)
                        .with_delay(delay),
                );
                let tick_tx = st.tick_tx.clone();
                let settings = Arc::clone(&record.settings);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tick_tx.send(Tick::Restart { settings });
                });
            }
            Ok(RestartRule::NoRestart) => {
                self.bus.publish(
                    Event::new(EventKind::RestartSuppressed)
                        .with_slot(slot)
                        .with_exit_code(code),
                );
            }
            Err(gap) => {
                self.bus.publish(
                    Event::new(EventKind::PolicyGap)
                        .with_slot(slot)
                        .with_exit_code(code)
                        .with_reason(gap.to_string()),
                );
            }
        }
    }

    /// Executes a readiness step: arm the debounce timer or notify a flip.
    fn apply_step(&self, st: &PoolState, step: Option<ReadinessStep>) {
        match step {
            None => {}
            Some(ReadinessStep::Flipped(ready)) => {
                self.ready_tx.send_replace(ready);
                self.bus
                    .publish(Event::new(EventKind::PoolStateChanged).with_ready(ready));
            }
            Some(ReadinessStep::ArmTimer { epoch, after }) => {
                let tick_tx = st.tick_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tick_tx.send(Tick::ReadyTimer { epoch });
                });
            }
        }
    }

    fn publish_spawn_failed(&self, slot: u32, err: &SpawnError) {
        self.bus.publish(
            Event::new(EventKind::SpawnFailed)
                .with_slot(slot)
                .with_reason(err.to_string()),
        );
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let set = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::SupervisorBuilder;
    use crate::workers::WorkerKind;
    use serde_json::{Value, json};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio::time::{Instant, timeout};

    /// In-memory spawner: records every spawn and lets the test inject
    /// process events and inspect what each worker was sent.
    #[derive(Default)]
    struct MockSpawner {
        fail_all: bool,
        state: StdMutex<MockState>,
    }

    #[derive(Default)]
    struct MockState {
        events: Option<mpsc::UnboundedSender<ProcessEvent>>,
        spawned: Vec<SpawnedWorker>,
    }

    struct SpawnedWorker {
        settings: WorkerSettings,
        config: RuntimeConfig,
        handle: crate::process::ProcessHandle,
        outbox: Option<mpsc::UnboundedReceiver<Value>>,
    }

    #[async_trait::async_trait]
    impl Spawn for MockSpawner {
        async fn spawn(
            &self,
            settings: &WorkerSettings,
            config: &RuntimeConfig,
            events: mpsc::UnboundedSender<ProcessEvent>,
        ) -> Result<crate::process::ProcessHandle, SpawnError> {
            if self.fail_all {
                return Err(SpawnError::Io(std::io::Error::other("mock spawn refused")));
            }
            let (tx, rx) = mpsc::unbounded_channel();
            let mut st = self.state.lock().unwrap();
            let pid = 1000 + st.spawned.len() as u32;
            let handle = crate::process::ProcessHandle::new(Some(pid), tx);
            st.events = Some(events);
            st.spawned.push(SpawnedWorker {
                settings: settings.clone(),
                config: config.clone(),
                handle: handle.clone(),
                outbox: Some(rx),
            });
            Ok(handle)
        }
    }

    impl MockSpawner {
        fn count(&self) -> usize {
            self.state.lock().unwrap().spawned.len()
        }

        fn handle_id(&self, i: usize) -> HandleId {
            self.state.lock().unwrap().spawned[i].handle.id()
        }

        fn settings_of(&self, i: usize) -> WorkerSettings {
            self.state.lock().unwrap().spawned[i].settings.clone()
        }

        fn config_of(&self, i: usize) -> RuntimeConfig {
            self.state.lock().unwrap().spawned[i].config.clone()
        }

        fn take_outbox(&self, i: usize) -> mpsc::UnboundedReceiver<Value> {
            self.state.lock().unwrap().spawned[i]
                .outbox
                .take()
                .expect("outbox already taken")
        }

        fn emit(&self, ev: ProcessEvent) {
            let st = self.state.lock().unwrap();
            st.events
                .as_ref()
                .expect("no spawn happened yet")
                .send(ev)
                .expect("control loop gone");
        }

        fn exit(&self, i: usize, code: i32, signal: Option<i32>) {
            let handle = self.handle_id(i);
            self.emit(ProcessEvent::Exit {
                handle,
                code,
                signal,
            });
        }
    }

    fn pool(n: u32) -> PoolDecl {
        PoolDecl::new(vec![WorkerKind::new("worker.bin").count(n)])
    }

    fn build(
        debounce_ms: u64,
        spawner: Arc<MockSpawner>,
    ) -> (Arc<Supervisor>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = PoolConfig::default();
        cfg.debounce = Duration::from_millis(debounce_ms);
        cfg.error_log = dir.path().join("error.log");
        let sup = Arc::new(
            SupervisorBuilder::new(cfg)
                .with_spawner(spawner)
                .build(),
        );
        (sup, dir)
    }

    async fn next_matching(
        rx: &mut broadcast::Receiver<Event>,
        pred: impl Fn(&Event) -> bool,
    ) -> Event {
        timeout(Duration::from_secs(60), async {
            loop {
                let ev = rx.recv().await.expect("bus closed");
                if pred(&ev) {
                    return ev;
                }
            }
        })
        .await
        .expect("event not observed in time")
    }

    async fn wait_spawns(rx: &mut broadcast::Receiver<Event>, n: usize) {
        for _ in 0..n {
            next_matching(rx, |e| e.kind == EventKind::WorkerSpawned).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn readiness_waits_for_debounce_after_pool_fills() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(100, Arc::clone(&spawner));
        let mut rx = sup.subscribe();
        let ready = sup.readiness();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(3), None).await });

        wait_spawns(&mut rx, 3).await;
        let filled_at = Instant::now();
        assert!(!*ready.borrow(), "ready must not flip before the debounce");

        let ev = next_matching(&mut rx, |e| e.kind == EventKind::PoolStateChanged).await;
        assert_eq!(ev.ready, Some(true));
        assert!(Instant::now() - filled_at >= Duration::from_millis(100));
        assert!(*ready.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn exit_degrades_readiness_before_the_respawn_lands() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(50, Arc::clone(&spawner));
        let mut rx = sup.subscribe();
        let ready = sup.readiness();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(3), None).await });

        wait_spawns(&mut rx, 3).await;
        next_matching(&mut rx, |e| e.kind == EventKind::PoolStateChanged).await;
        assert!(*ready.borrow());

        spawner.exit(0, 1, None);
        let ev = next_matching(&mut rx, |e| e.kind == EventKind::PoolStateChanged).await;
        assert_eq!(ev.ready, Some(false), "degrade must precede the re-fill flip");

        // Default policy respawns and the pool eventually becomes ready again.
        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;
        let ev = next_matching(&mut rx, |e| e.kind == EventKind::PoolStateChanged).await;
        assert_eq!(ev.ready, Some(true));
    }

    #[tokio::test(start_paused = true)]
    async fn policyless_exit_respawns_with_identical_settings() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(2), None).await });
        wait_spawns(&mut rx, 2).await;

        let dead = spawner.settings_of(1);
        spawner.exit(1, 42, None);
        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;

        assert_eq!(spawner.count(), 3);
        let respawned = spawner.settings_of(2);
        assert_eq!(respawned, dead, "restart must reuse the dead worker's settings");
    }

    #[tokio::test(start_paused = true)]
    async fn no_restart_rule_leaves_slot_vacant() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();
        let ready = sup.readiness();

        let rules = ExitRules::new()
            .with_rule(137, RestartRule::NoRestart)
            .with_fallback(RestartRule::Restart);
        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(3), Some(rules)).await });

        wait_spawns(&mut rx, 3).await;
        next_matching(&mut rx, |e| e.kind == EventKind::PoolStateChanged).await;

        spawner.exit(0, 137, Some(9));
        next_matching(&mut rx, |e| e.kind == EventKind::RestartSuppressed).await;

        // Give any (wrong) respawn plenty of virtual time to show up.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(spawner.count(), 3, "suppressed exit must not respawn");
        assert!(!*ready.borrow(), "pool stays degraded with expected unchanged");
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_restart_waits_the_configured_delay() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let rules = ExitRules::new()
            .with_rule(1, RestartRule::DelayedRestart(Duration::from_millis(500)))
            .with_fallback(RestartRule::Restart);
        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(2), Some(rules)).await });
        wait_spawns(&mut rx, 2).await;

        spawner.exit(0, 1, None);
        let scheduled =
            next_matching(&mut rx, |e| e.kind == EventKind::RestartScheduled).await;
        assert_eq!(scheduled.delay_ms, Some(500));
        let exited_at = Instant::now();

        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;
        assert!(
            Instant::now() - exited_at >= Duration::from_millis(500),
            "respawn must not land before the delay"
        );
        assert_eq!(spawner.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unmapped_exit_code_is_a_loud_policy_gap() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let rules = ExitRules::new().with_rule(0, RestartRule::Restart);
        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(2), Some(rules)).await });
        wait_spawns(&mut rx, 2).await;

        spawner.exit(0, 3, None);
        let gap = next_matching(&mut rx, |e| e.kind == EventKind::PolicyGap).await;
        assert_eq!(gap.exit_code, Some(3));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(spawner.count(), 2, "a policy gap must not restart");
    }

    #[tokio::test(start_paused = true)]
    async fn relay_reaches_everyone_except_the_sender() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(3), None).await });
        wait_spawns(&mut rx, 3).await;

        let mut out0 = spawner.take_outbox(0);
        let mut out1 = spawner.take_outbox(1);
        let mut out2 = spawner.take_outbox(2);

        let sender = spawner.handle_id(0);
        spawner.emit(ProcessEvent::Message {
            from: sender,
            payload: json!({"job": 7}),
        });

        let got1 = timeout(Duration::from_secs(5), out1.recv()).await.unwrap();
        let got2 = timeout(Duration::from_secs(5), out2.recv()).await.unwrap();
        assert_eq!(got1, Some(json!({"job": 7})));
        assert_eq!(got2, Some(json!({"job": 7})));
        assert!(
            out0.try_recv().is_err(),
            "the sender must not receive its own message"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exit_of_unknown_handle_is_ignored() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(2), None).await });
        wait_spawns(&mut rx, 2).await;

        // A handle the registry never saw.
        let (tx, _rx) = mpsc::unbounded_channel();
        let ghost = crate::process::ProcessHandle::new(None, tx);
        spawner.emit(ProcessEvent::Exit {
            handle: ghost.id(),
            code: 1,
            signal: None,
        });

        // The loop must keep working: a real exit still restarts.
        spawner.exit(0, 1, None);
        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;
        assert_eq!(spawner.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn startup_directives_are_sent_on_launch_and_restart() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let decl = PoolDecl::new(vec![WorkerKind::new("worker.bin")
            .send_slot()
            .start_message(json!({"mode": "batch"}))]);
        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(decl, None).await });
        wait_spawns(&mut rx, 1).await;

        let mut out = spawner.take_outbox(0);
        assert_eq!(out.recv().await, Some(json!({"slot": 1})));
        assert_eq!(out.recv().await, Some(json!({"mode": "batch"})));

        spawner.exit(0, 1, None);
        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;
        let mut out = spawner.take_outbox(1);
        assert_eq!(out.recv().await, Some(json!({"slot": 1})));
        assert_eq!(out.recv().await, Some(json!({"mode": "batch"})));
    }

    #[tokio::test(start_paused = true)]
    async fn runtime_config_carries_slot_and_pool_width() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, _dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(2), None).await });
        wait_spawns(&mut rx, 2).await;

        let cfg0 = spawner.config_of(0);
        let cfg1 = spawner.config_of(1);
        assert_eq!(cfg0.slot, 1);
        assert_eq!(cfg1.slot, 2);
        assert_eq!(cfg0.max_slots, 2);
        assert_eq!(cfg0.port, 80);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_spawn_failure_aborts_run() {
        let spawner = Arc::new(MockSpawner {
            fail_all: true,
            ..Default::default()
        });
        let (sup, _dir) = build(10, Arc::clone(&spawner));

        let err = sup.run(pool(2), None).await.unwrap_err();
        match err {
            RuntimeError::Spawn { slot, .. } => assert_eq!(slot, 1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exit_lines_land_in_the_error_log() {
        let spawner = Arc::new(MockSpawner::default());
        let (sup, dir) = build(10, Arc::clone(&spawner));
        let mut rx = sup.subscribe();

        let runner = Arc::clone(&sup);
        tokio::spawn(async move { runner.run(pool(1), None).await });
        wait_spawns(&mut rx, 1).await;

        spawner.exit(0, 7, None);
        next_matching(&mut rx, |e| e.kind == EventKind::WorkerSpawned).await;

        let content = tokio::fs::read_to_string(dir.path().join("error.log"))
            .await
            .unwrap();
        assert!(content.contains("|pid:1000|code:7|signal:none"));
    }
}
